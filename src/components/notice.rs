use maud::{html, Markup};

use crate::view::Notice;

/// The alert area. With `oob` set it replaces the one already on the page.
pub fn view(oob: bool, notice: Option<&Notice>) -> Markup {
    html! {
        div id="notice" hx-swap-oob=[oob.then_some("true")] {
            @if let Some(notice) = notice {
                @let color = if notice.is_failure() {
                    "bg-red-500 dark:bg-red-700"
                } else {
                    "bg-green-500 dark:bg-green-700"
                };
                div role="alert" class={(color) " rounded-lg p-2 flex justify-between items-center shadow-lg"} {
                    span { (notice.message()) }
                    button class="px-2" onclick="this.parentElement.remove()" { "x" }
                }
            }
        }
    }
}
