use crate::domain::a001_article::ui::list::ArticleList;
use crate::domain::a002_article_category::ui::list::ArticleCategoryList;
use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Articles,
    Categories,
}

#[component]
pub fn App() -> impl IntoView {
    let section = RwSignal::new(Section::Articles);

    view! {
        <div class="app">
            <nav class="app-nav">
                <Button
                    appearance=move || {
                        if section.get() == Section::Articles {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Subtle
                        }
                    }
                    on_click=move |_| section.set(Section::Articles)
                >
                    "Статьи"
                </Button>
                <Button
                    appearance=move || {
                        if section.get() == Section::Categories {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Subtle
                        }
                    }
                    on_click=move |_| section.set(Section::Categories)
                >
                    "Категории"
                </Button>
            </nav>
            {move || match section.get() {
                Section::Articles => view! { <ArticleList /> }.into_any(),
                Section::Categories => view! { <ArticleCategoryList /> }.into_any(),
            }}
        </div>
    }
}
