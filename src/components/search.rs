use maud::{html, Markup};

/// Search box plus the autocomplete list under it.
///
/// Every keystroke goes to `/search`, which debounces it, and to `/search/suggest`, which
/// answers straight from the loaded page. A keystroke aborts the search still in flight, so the
/// server sees the burst as overlapping requests and only the last one settles.
pub fn view(term: &str, suggestions: &[String]) -> Markup {
    html! {
        div id="search-container" class="flex flex-col gap-1" {
            form class="mb-0" hx-post="/search" hx-trigger="input from:#search-input, search from:#search-input"
            hx-sync="this:replace" hx-target="#course-list" hx-swap="outerHTML" {
                (input(false, term))
            }
            (suggestion_list(false, suggestions))
        }
    }
}

pub fn input(oob: bool, term: &str) -> Markup {
    html! {
        input id="search-input" type="search" name="search" value=(term) placeholder="Search..." autocomplete="off"
        class="form-control w-full h-12 rounded-lg p-1 text-xl bg-white dark:bg-neutral-800 dark:text-white dark:placeholder:text-neutral-400 shadow-lg"
        hx-post="/search/suggest" hx-trigger="input, focus" hx-target="#suggestions" hx-swap="outerHTML"
        hx-swap-oob=[oob.then_some("true")];
    }
}

pub fn suggestion_list(oob: bool, suggestions: &[String]) -> Markup {
    html! {
        ul id="suggestions" class="flex flex-col rounded-lg bg-white dark:bg-neutral-800 shadow-lg"
        hx-swap-oob=[oob.then_some("true")] {
            @for name in suggestions {
                li class="border-b dark:border-neutral-600" {
                    button type="button" name="search" value=(name)
                    class="w-full text-left p-1 hover:bg-slate-200 hover:dark:bg-neutral-700"
                    hx-post="/search/select" hx-target="#course-list" hx-swap="outerHTML" {
                        (name)
                    }
                }
            }
        }
    }
}
