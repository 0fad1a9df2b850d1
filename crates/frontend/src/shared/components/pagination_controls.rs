use leptos::prelude::*;

/// Навигация по страницам списка (номер страницы с 1)
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u32>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<u64>,

    /// Current page size
    #[prop(into)]
    limit: Signal<u32>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Callback when page size changes
    on_limit_change: Callback<u32>,

    /// Available page size options (optional, defaults to [10, 25, 50, 100])
    #[prop(optional)]
    limit_options: Option<Vec<u32>>,
) -> impl IntoView {
    let limit_opts = limit_options.unwrap_or_else(|| vec![10, 25, 50, 100]);
    let is_first = move || page.get() <= 1;
    let is_last = move || page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=is_first
                title="Первая страница"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let current = page.get();
                    if current > 1 {
                        on_page_change.run(current - 1);
                    }
                }
                disabled=is_first
                title="Предыдущая страница"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || {
                    format!("{} / {} ({})", page.get(), total_pages.get().max(1), total_count.get())
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let current = page.get();
                    if current < total_pages.get() {
                        on_page_change.run(current + 1);
                    }
                }
                disabled=is_last
                title="Следующая страница"
            >
                "›"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=is_last
                title="Последняя страница"
            >
                "»"
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse() {
                        on_limit_change.run(value);
                    }
                }
                prop:value=move || limit.get().to_string()
            >
                {limit_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || limit.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
