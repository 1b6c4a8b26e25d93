use maud::{html, Markup};

use super::course_form;
use crate::view::EditDialog;

pub fn view(dialog: &EditDialog) -> Markup {
    html! {
        div id="dialog" class="fixed inset-0 bg-black/50 flex items-center justify-center" {
            div role="dialog" aria-modal="true"
            class="bg-white dark:bg-neutral-800 rounded-lg p-4 w-full max-w-2xl shadow-xl flex flex-col gap-2" {
                h2 class="text-xl" { "edit course" }
                (course_form::view(dialog.view(), html! {
                    button type="button" hx-get="/dialog/close" hx-target="#dialog" hx-swap="outerHTML"
                    class="bg-slate-300 dark:bg-neutral-600 transition rounded-lg p-1 text-xl" {
                        "cancel"
                    }
                }))
            }
        }
    }
}

/// Placeholder the dialog is swapped into
pub fn closed(oob: bool) -> Markup {
    html! {
        div id="dialog" hx-swap-oob=[oob.then_some("true")] {}
    }
}
