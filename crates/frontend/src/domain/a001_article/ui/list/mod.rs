use contracts::domain::a001_article::dto::{ArticleCategoryDto, ArticleListItemDto, ArticleStatus};
use contracts::shared::query::{FilterValue, QueryState, SelectOption, SortField};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_article::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::list_utils::SearchInput;
use crate::shared::request_state::{use_request_state, RequestStateOptions};

const TABLE_ID: &str = "a001-article-table";

fn initial_state() -> QueryState {
    QueryState {
        limit: 25,
        sorts: vec![SortField::desc("published_at")],
        ..Default::default()
    }
}

/// Value of a select bound to an option filter; "" when the filter is unset
fn selected_value(filter: Option<&FilterValue>) -> String {
    filter
        .and_then(FilterValue::as_option)
        .map(|option| option.value.to_string())
        .unwrap_or_default()
}

fn find_option(options: &[SelectOption], value: &str) -> Option<SelectOption> {
    options
        .iter()
        .find(|option| option.value.to_string() == value)
        .cloned()
}

#[component]
pub fn ArticleList() -> impl IntoView {
    let rs = use_request_state(Some(initial_state()), RequestStateOptions::default());

    let (items, set_items) = signal(Vec::<ArticleListItemDto>::new());
    let (total_count, set_total_count) = signal(0u64);
    let (total_pages, set_total_pages) = signal(0u32);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let categories = RwSignal::new(Vec::<SelectOption>::new());
    let status_options: Vec<SelectOption> =
        ArticleStatus::ALL.iter().map(|s| s.to_option()).collect();
    let status_options = StoredValue::new(status_options);

    spawn_local(async move {
        match api::fetch_categories().await {
            Ok(list) => categories.set(
                list.iter()
                    .filter_map(ArticleCategoryDto::to_option)
                    .collect(),
            ),
            Err(e) => log::error!("Failed to load article categories: {}", e),
        }
    });

    // Ответы на устаревшие запросы отбрасываются
    let request_seq = StoredValue::new(0u64);
    Effect::new(move |_| {
        let query = rs.query.get();
        request_seq.update_value(|seq| *seq += 1);
        let seq = request_seq.get_value();

        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            let result = api::fetch_articles(&query).await;
            if request_seq.get_value() != seq {
                return;
            }
            match result {
                Ok(page) => {
                    set_total_pages.set(page.total_pages());
                    set_total_count.set(page.total);
                    set_items.set(page.items);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let set_option_filter = move |key: &'static str, option: Option<SelectOption>| {
        rs.set_filter.run((key.to_string(), option.map(FilterValue::from)));
        rs.reset_page.run(());
    };

    let on_phrase_change = Callback::new(move |phrase: String| {
        rs.set_phrase.run(phrase);
        rs.reset_page.run(());
    });

    let on_limit_change = Callback::new(move |limit: u32| {
        rs.set_limit.run(limit);
        rs.reset_page.run(());
    });

    let active_filters_count = Signal::derive(move || {
        let filters = rs.filters.with(|f| f.as_ref().map_or(0, |f| f.len()));
        let phrase = rs.phrase.with(|p| p.as_deref().map_or(0, |p| usize::from(!p.is_empty())));
        filters + phrase
    });

    view! {
        <div class="page" id="a001_article--list">
            <div class="filter-panel">
                <div class="filter-panel-header">
                    <div class="filter-panel-header__left">
                        <span class="filter-panel__title">"Статьи"</span>
                        {move || {
                            let count = active_filters_count.get();
                            if count > 0 {
                                view! { <span class="filter-panel__badge">{count}</span> }.into_any()
                            } else {
                                view! { <></> }.into_any()
                            }
                        }}
                    </div>

                    <div class="filter-panel-header__center">
                        <PaginationControls
                            page=rs.page
                            total_pages=total_pages
                            total_count=total_count
                            limit=rs.limit
                            on_page_change=rs.set_page
                            on_limit_change=on_limit_change
                        />
                    </div>
                </div>

                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Поиск:"</Label>
                            <SearchInput
                                value=rs.phrase_text()
                                on_change=on_phrase_change
                                placeholder="Заголовок, автор..."
                            />
                        </Flex>

                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Категория:"</Label>
                            <select
                                prop:value=move || rs.filters.with(|f| selected_value(f.as_ref().and_then(|f| f.get("category_id"))))
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    let option = categories.with_untracked(|opts| find_option(opts, &value));
                                    set_option_filter("category_id", option);
                                }
                            >
                                <option value="">"Все"</option>
                                <For
                                    each=move || categories.get()
                                    key=|option| option.value.to_string()
                                    children=move |option| {
                                        let value = option.value.to_string();
                                        view! { <option value=value>{option.label}</option> }
                                    }
                                />
                            </select>
                        </Flex>

                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Статус:"</Label>
                            <select
                                prop:value=move || rs.filters.with(|f| selected_value(f.as_ref().and_then(|f| f.get("status"))))
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    let option = status_options.with_value(|opts| find_option(opts, &value));
                                    set_option_filter("status", option);
                                }
                            >
                                <option value="">"Все"</option>
                                {status_options.get_value().into_iter().map(|option| {
                                    let value = option.value.to_string();
                                    view! { <option value=value>{option.label}</option> }
                                }).collect_view()}
                            </select>
                        </Flex>
                    </Flex>
                </div>
            </div>

            {move || {
                error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })
            }}

            <div class="table-wrapper">
                <Table attr:id=TABLE_ID attr:style="width: 100%; min-width: 800px;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Заголовок" sort_field="title" sorts=rs.sorts on_sort=rs.toggle_sort min_width=300.0 />
                            <SortableHeaderCell label="Категория" sort_field="category_name" sorts=rs.sorts on_sort=rs.toggle_sort />
                            <SortableHeaderCell label="Статус" sort_field="status" sorts=rs.sorts on_sort=rs.toggle_sort />
                            <SortableHeaderCell label="Автор" sort_field="author" sorts=rs.sorts on_sort=rs.toggle_sort />
                            <SortableHeaderCell label="Опубликована" sort_field="published_at" sorts=rs.sorts on_sort=rs.toggle_sort />
                        </TableRow>
                    </TableHeader>

                    <TableBody>
                        <For
                            each=move || items.get()
                            key=|item| item.id.clone()
                            children=move |item| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{item.title.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {item.category_name.clone().unwrap_or_else(|| "—".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{item.status.label()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {item.author.clone().unwrap_or_else(|| "—".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {item.published_at.clone().unwrap_or_else(|| "—".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                {move || {
                    (loading.get() && items.with(Vec::is_empty))
                        .then(|| view! { <div class="table-wrapper__loading">"Загрузка..."</div> })
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::query::Filters;

    #[test]
    fn test_selected_value() {
        let filters = Filters::new()
            .with("category_id", SelectOption::new("Cat", 42))
            .with("status", "draft");
        assert_eq!(selected_value(filters.get("category_id")), "42");
        // a plain value is not an option-bound select
        assert_eq!(selected_value(filters.get("status")), "");
        assert_eq!(selected_value(None), "");
    }

    #[test]
    fn test_find_option() {
        let options = vec![SelectOption::new("A", 1), SelectOption::new("B", 2)];
        assert_eq!(find_option(&options, "2"), Some(SelectOption::new("B", 2)));
        assert_eq!(find_option(&options, ""), None);
    }
}
