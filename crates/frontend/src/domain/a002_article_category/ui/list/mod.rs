use contracts::domain::a001_article::dto::ArticleCategoryDto;
use contracts::shared::query::SortField;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a001_article::api::fetch_categories;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::list_utils::{sort_by_fields, Sortable};
use crate::shared::request_state::use_table_sorts;

impl Sortable for ArticleCategoryDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "id" => self.id.cmp(&other.id),
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "slug" => self.slug.cmp(&other.slug),
            _ => Ordering::Equal,
        }
    }
}

/// Справочник категорий: весь список грузится сразу и сортируется на клиенте
#[component]
pub fn ArticleCategoryList() -> impl IntoView {
    let (categories, set_categories) = signal(Vec::<ArticleCategoryDto>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let table_sorts = use_table_sorts(vec![SortField::asc("name")]);

    spawn_local(async move {
        match fetch_categories().await {
            Ok(list) => set_categories.set(list),
            Err(e) => set_error.set(Some(e)),
        }
    });

    let sorted = Memo::new(move |_| {
        let mut items = categories.get();
        table_sorts.parsed_sorts.with(|sorts| sort_by_fields(&mut items, sorts));
        items
    });

    view! {
        <div class="page" id="a002_article_category--list">
            {move || {
                error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="ID" sort_field="id" sorts=table_sorts.sorts on_sort=table_sorts.toggle_sort min_width=60.0 align="right" />
                            <SortableHeaderCell label="Наименование" sort_field="name" sorts=table_sorts.sorts on_sort=table_sorts.toggle_sort min_width=240.0 />
                            <SortableHeaderCell label="Slug" sort_field="slug" sorts=table_sorts.sorts on_sort=table_sorts.toggle_sort />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || sorted.get()
                            key=|item| item.id
                            children=move |item| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{item.id}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{item.name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{item.slug.clone()}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str) -> ArticleCategoryDto {
        ArticleCategoryDto {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let mut items = vec![category(1, "news"), category(2, "Anatomy"), category(3, "Blog")];
        sort_by_fields(&mut items, &[SortField::asc("name")]);
        let ids: Vec<_> = items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
