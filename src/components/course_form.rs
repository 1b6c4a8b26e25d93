use maud::{html, Markup};

use crate::{
    course::CURRENCIES,
    view::{Field, FormMode, FormView},
};

const INPUT: &str = "rounded-lg p-1 text-black border-2 border-neutral-400 dark:border-0";

/// The course form. `actions` is rendered next to the submit button.
pub fn view(view: &FormView, actions: Markup) -> Markup {
    let submit = html! {
        div class="flex gap-2 justify-end" {
            (actions)
            button type="submit"
            class="bg-green-500 dark:bg-green-600 hover:bg-green-700 hover:dark:bg-green-800 transition rounded-lg p-1 text-xl" {
                "save"
            }
        }
    };

    html! {
        @match view.mode() {
            FormMode::Create => {
                form id="course-form" class="flex flex-col gap-2 mb-0"
                hx-post="/courses" hx-target="#course-form" hx-swap="outerHTML" {
                    (fields(view))
                    (submit)
                }
            }
            FormMode::Edit(id) => {
                form id="course-form" class="flex flex-col gap-2 mb-0"
                hx-put={"/courses/" (id)} hx-target="#dialog" hx-swap="outerHTML" {
                    (fields(view))
                    (submit)
                }
            }
        }
    }
}

fn fields(view: &FormView) -> Markup {
    let form = view.form();
    let errors = view.errors();

    html! {
        @if !errors.form().is_empty() {
            ul class="text-red-600 dark:text-red-400" {
                @for message in errors.form() {
                    li { (message) }
                }
            }
        }
        div class="grid grid-cols-1 md:grid-cols-2 gap-2" {
            @for field in Field::ALL {
                label class="flex flex-col gap-1" {
                    span { (field.label()) }
                    (control(field, form.value(field)))
                    @if let Some(error) = errors.field(field) {
                        span class="text-sm text-red-600 dark:text-red-400" { (error) }
                    }
                }
            }
        }
    }
}

fn control(field: Field, value: &str) -> Markup {
    match field {
        Field::CourseDescription => html! {
            textarea name=(field.name()) class=(INPUT) rows="3" { (value) }
        },
        Field::StartDate | Field::EndDate => html! {
            input type="date" name=(field.name()) value=(value) class=(INPUT);
        },
        Field::Price => html! {
            input type="number" name=(field.name()) value=(value) min="0" step="0.01" class=(INPUT);
        },
        Field::Currency => html! {
            select name=(field.name()) class=(INPUT) {
                option value="" selected[value.is_empty()] { "choose..." }
                @for (code, name) in CURRENCIES {
                    option value=(code) selected[*code == value] { (code) " - " (name) }
                }
            }
        },
        _ => html! {
            input type="text" name=(field.name()) value=(value) class=(INPUT);
        },
    }
}
