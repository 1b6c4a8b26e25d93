use maud::{html, Markup};

use crate::{course::Course, view::ListView};

const PAGE_SIZES: [u32; 5] = [5, 10, 25, 50, 100];

pub fn view(oob: bool, list: &ListView) -> Markup {
    let state = list.state();

    html! {
        div id="course-list" hx-swap-oob=[oob.then_some("true")]
        class="flex flex-col gap-2 rounded-lg p-2 bg-white dark:bg-neutral-800 shadow-lg" {
            @if list.courses().is_empty() {
                p class="p-2" {
                    @if state.term.is_empty() {
                        "no courses on this page"
                    } @else {
                        "no courses match \"" (state.term) "\""
                    }
                }
            } @else {
                table class="w-full text-left" {
                    thead {
                        tr class="border-b-2 dark:border-neutral-500" {
                            th { "course" }
                            th { "university" }
                            th { "location" }
                            th { "dates" }
                            th { "price" }
                            th {}
                        }
                    }
                    tbody {
                        @for course in list.courses() {
                            (row(course))
                        }
                    }
                }
            }
            (pager(list))
        }
    }
}

fn row(course: &Course) -> Markup {
    html! {
        tr id={"course-" (course.id)} class="border-b dark:border-neutral-600" {
            td {
                div class="font-bold" { (course.course_name) }
                div class="text-xs" { (course.course_description) }
            }
            td { (course.university) }
            td { (course.city) ", " (course.country) }
            td { (course.start_date.to_string()) " to " (course.end_date.to_string()) }
            td { (course.price_display()) }
            td class="flex gap-1 py-1" {
                button hx-get={"/courses/" (course.id) "/edit"} hx-target="#dialog" hx-swap="outerHTML"
                class="bg-blue-500 dark:bg-blue-600 hover:bg-blue-700 hover:dark:bg-blue-800 transition rounded-lg p-1" {
                    "edit"
                }
                button hx-delete={"/courses/" (course.id)} hx-confirm={"Delete " (course.course_name) "?"}
                hx-target="#course-list" hx-swap="outerHTML"
                class="bg-red-500 dark:bg-red-600 hover:bg-red-700 hover:dark:bg-red-800 transition rounded-lg p-1" {
                    "delete"
                }
            }
        }
    }
}

fn pager(list: &ListView) -> Markup {
    let state = list.state();

    html! {
        div id="pager" class="flex justify-between items-center" {
            div class="flex gap-2 items-center" {
                @if state.page > 1 {
                    button name="page" value=(state.page - 1) hx-post="/page" hx-target="#course-list" hx-swap="outerHTML"
                    class="bg-slate-300 dark:bg-neutral-600 rounded-lg px-2" {
                        "previous"
                    }
                }
                span { "page " (state.page) }
                @if list.may_have_next() {
                    button name="page" value=(state.page + 1) hx-post="/page" hx-target="#course-list" hx-swap="outerHTML"
                    class="bg-slate-300 dark:bg-neutral-600 rounded-lg px-2" {
                        "next"
                    }
                }
            }
            form class="mb-0" hx-post="/page-size" hx-trigger="change" hx-target="#course-list" hx-swap="outerHTML" {
                label {
                    "per page "
                    select name="page_size" class="rounded-lg text-black" {
                        @for size in PAGE_SIZES {
                            option value=(size) selected[size == state.page_size] { (size) }
                        }
                    }
                }
            }
        }
    }
}
