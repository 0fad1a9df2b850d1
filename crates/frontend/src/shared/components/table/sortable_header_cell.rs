//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Примеры
//!
//! ```rust,ignore
//! // Многоколоночная сортировка через use_request_state
//! <SortableHeaderCell
//!     label="Заголовок"
//!     sort_field="title"
//!     sorts=rs.sorts
//!     on_sort=rs.toggle_sort
//! />
//!
//! // С правым выравниванием (для числовых колонок)
//! <SortableHeaderCell
//!     label="Просмотры"
//!     sort_field="views"
//!     align="right"
//!     ...
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::query::SortFields;
use leptos::prelude::*;
use thaw::*;

/// Компонент сортируемой ячейки заголовка таблицы
///
/// Клик переключает колонку: без сортировки → ▲ → ▼ → без сортировки.
/// При сортировке по нескольким колонкам рядом со стрелкой виден приоритет.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущая сортировка списка
    #[prop(into)]
    sorts: Signal<SortFields>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,

    /// Можно ли изменять размер колонки
    #[prop(optional, default = true)]
    resizable: bool,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let handle_click = move |_| {
        on_sort.run(sort_field_for_click.clone());
    };

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px; max-width: calc(100% - 12px);"
    } else {
        "cursor: pointer; padding-right: 12px; max-width: calc(100% - 12px);"
    };

    view! {
        <TableHeaderCell
            resizable=resizable
            min_width=min_width
            class="resizable"
        >
            <div
                class="table__sortable-header"
                style=header_style
                on:click=handle_click
            >
                {label}
                <span class=move || sorts.with(|s| get_sort_class(s, &sort_field_for_class))>
                    {move || sorts.with(|s| get_sort_indicator(s, &sort_field_for_indicator))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
