use maud::{html, Markup, DOCTYPE};

pub mod course_form;
pub mod course_list;
pub mod edit_dialog;
pub mod notice;
pub mod search;

pub fn base(content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                title {"course catalog"}
                script src="/assets/htmx.min.js" {}
                script src="/assets/tailwind.js" {}
                meta name="viewport" content="width=device-width,initial-scale=1.0" {}
            }
            body class="bg-slate-100 dark:bg-neutral-900 dark:text-white" {
                div id="app-container" class="flex flex-col gap-2 p-2 max-w-5xl mx-auto" {
                    (content)
                }
            }
        }
    }
}

/// Top bar shared by every page
pub fn header() -> Markup {
    html! {
        div class="flex justify-between items-center" {
            a href="/" class="text-2xl font-bold" { "course catalog" }
            a href="/courses/new"
            class="bg-green-500 dark:bg-green-600 hover:bg-green-700 hover:dark:bg-green-800 transition rounded-lg p-1 text-xl" {
                "new course"
            }
        }
    }
}
