/// Универсальные утилиты для работы со списками (поиск, сортировка, UI компоненты)
use contracts::shared::query::{SortDirection, SortField, SortFields};
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

const SEARCH_DEBOUNCE_MS: i32 = 300;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Сортирует список по нескольким полям (первое поле — главное)
pub fn sort_by_fields<T: Sortable>(items: &mut [T], sorts: &[SortField]) {
    if sorts.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        sorts
            .iter()
            .map(|sort| {
                let cmp = a.compare_by_field(b, &sort.field);
                match sort.direction {
                    SortDirection::Asc => cmp,
                    SortDirection::Desc => cmp.reverse(),
                }
            })
            .find(|cmp| cmp.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Индикатор сортировки для заголовка: ▲/▼, с номером приоритета при сортировке по нескольким колонкам
pub fn get_sort_indicator(sorts: &SortFields, field: &str) -> String {
    let Some(direction) = sorts.direction(field) else {
        return " ⇅".to_string();
    };
    let arrow = if direction.is_ascending() { "▲" } else { "▼" };
    match sorts.priority(field) {
        Some(priority) if sorts.len() > 1 => format!(" {}{}", arrow, priority + 1),
        _ => format!(" {}", arrow),
    }
}

pub fn get_sort_class(sorts: &SortFields, field: &str) -> &'static str {
    if sorts.direction(field).is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };

        // Отменяем предыдущий таймер если есть
        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            SEARCH_DEBOUNCE_MS,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                debounce_timeout.set_value(Some(timeout_id));
            }
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    };

    let clear_filter = move |_| {
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 250px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if value.get().is_empty() { "white" } else { "#fffbea" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Очистить"
                    >
                        "×"
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
