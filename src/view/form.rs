use std::{collections::BTreeMap, fmt};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::Notice;
use crate::{
    course::{currency_name, Course},
    data::CourseStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    University,
    City,
    Country,
    CourseName,
    CourseDescription,
    StartDate,
    EndDate,
    Price,
    Currency,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::University,
        Self::City,
        Self::Country,
        Self::CourseName,
        Self::CourseDescription,
        Self::StartDate,
        Self::EndDate,
        Self::Price,
        Self::Currency,
    ];

    /// Name of the form control, which is also the JSON field name
    pub fn name(self) -> &'static str {
        match self {
            Field::University => "university",
            Field::City => "city",
            Field::Country => "country",
            Field::CourseName => "course_name",
            Field::CourseDescription => "course_description",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
            Field::Price => "price",
            Field::Currency => "currency",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::University => "University",
            Field::City => "City",
            Field::Country => "Country",
            Field::CourseName => "Course name",
            Field::CourseDescription => "Description",
            Field::StartDate => "Start date",
            Field::EndDate => "End date",
            Field::Price => "Price",
            Field::Currency => "Currency",
        }
    }
}

/// Field values exactly as the browser submitted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseForm {
    pub university: String,
    pub city: String,
    pub country: String,
    pub course_name: String,
    pub course_description: String,
    pub start_date: String,
    pub end_date: String,
    pub price: String,
    pub currency: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            university: String::new(),
            city: String::new(),
            country: String::new(),
            course_name: String::new(),
            course_description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            price: "0".to_string(),
            currency: String::new(),
        }
    }
}

impl From<&Course> for CourseForm {
    fn from(course: &Course) -> Self {
        Self {
            university: course.university.clone(),
            city: course.city.clone(),
            country: course.country.clone(),
            course_name: course.course_name.clone(),
            course_description: course.course_description.clone(),
            start_date: course.start_date.to_string(),
            end_date: course.end_date.to_string(),
            price: course.price.to_string(),
            currency: course.currency.clone(),
        }
    }
}

impl CourseForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::University => &self.university,
            Field::City => &self.city,
            Field::Country => &self.country,
            Field::CourseName => &self.course_name,
            Field::CourseDescription => &self.course_description,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
            Field::Price => &self.price,
            Field::Currency => &self.currency,
        }
    }

    /// Checks every rule and builds the (unsaved) course, or reports everything that is wrong.
    pub fn validate(&self) -> Result<Course, FormErrors> {
        let mut errors = FormErrors::default();

        let university = required(&mut errors, Field::University, &self.university);
        let city = required(&mut errors, Field::City, &self.city);
        let country = required(&mut errors, Field::Country, &self.country);
        let course_name = required(&mut errors, Field::CourseName, &self.course_name);
        let course_description =
            required(&mut errors, Field::CourseDescription, &self.course_description);
        let start_date = date_field(&mut errors, Field::StartDate, &self.start_date);
        let end_date = date_field(&mut errors, Field::EndDate, &self.end_date);
        let price = price_field(&mut errors, &self.price);
        let currency = required(&mut errors, Field::Currency, &self.currency).filter(|code| {
            let known = currency_name(code).is_some();
            if !known {
                errors.insert(Field::Currency, "Pick a currency from the list");
            }
            known
        });

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.insert(Field::EndDate, "End date must be after the start date");
                errors.push_form("The course has to end after it starts");
            }
        }

        match (
            university,
            city,
            country,
            course_name,
            course_description,
            start_date,
            end_date,
            price,
            currency,
        ) {
            (
                Some(university),
                Some(city),
                Some(country),
                Some(course_name),
                Some(course_description),
                Some(start_date),
                Some(end_date),
                Some(price),
                Some(currency),
            ) if errors.is_empty() => Ok(Course {
                id: String::new(),
                university: university.to_string(),
                city: city.to_string(),
                country: country.to_string(),
                course_name: course_name.to_string(),
                course_description: course_description.to_string(),
                start_date,
                end_date,
                price,
                currency: currency.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(errors: &mut FormErrors, field: Field, value: &'a str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        return None;
    }
    Some(value)
}

fn date_field(errors: &mut FormErrors, field: Field, value: &str) -> Option<Date> {
    let value = required(errors, field, value)?;
    match value.parse() {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(field, format!("{} must be a date (YYYY-MM-DD)", field.label()));
            None
        }
    }
}

fn price_field(errors: &mut FormErrors, value: &str) -> Option<f64> {
    let value = required(errors, Field::Price, value)?;
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
        Ok(price) if price.is_finite() => {
            errors.insert(Field::Price, "Price cannot be negative");
            None
        }
        _ => {
            errors.insert(Field::Price, "Price must be a number");
            None
        }
    }
}

/// Per-field messages plus messages about the form as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<Field, String>,
    form: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn form(&self) -> &[String] {
        &self.form
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    fn push_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .form
            .iter()
            .map(String::as_str)
            .chain(self.fields.values().map(String::as_str))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; nothing was sent
    Invalid,
    Saved(Course),
    Failed,
}

/// The create/edit course form.
#[derive(Debug, Clone)]
pub struct FormView {
    form: CourseForm,
    mode: FormMode,
    errors: FormErrors,
    notice: Option<Notice>,
}

impl FormView {
    pub fn new(mode: FormMode, form: CourseForm) -> Self {
        Self {
            form,
            mode,
            errors: FormErrors::default(),
            notice: None,
        }
    }

    pub fn create() -> Self {
        Self::new(FormMode::Create, CourseForm::default())
    }

    pub fn edit(course: &Course) -> Self {
        Self::new(FormMode::Edit(course.id.clone()), CourseForm::from(course))
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn reset(&mut self) {
        self.form = CourseForm::default();
        self.errors = FormErrors::default();
    }

    /// Runs validation, keeping the errors around for rendering.
    pub fn validate(&mut self) -> Option<Course> {
        match self.form.validate() {
            Ok(course) => {
                self.errors = FormErrors::default();
                Some(course)
            }
            Err(errors) => {
                warn!(%errors, "course form rejected");
                self.notice = Some(Notice::Failure(format!(
                    "Please fix the form: {}",
                    errors
                )));
                self.errors = errors;
                None
            }
        }
    }

    /// Validates and, if that passes, creates or updates the course. On success the form is
    /// cleared; on failure it is left as the user typed it.
    pub async fn submit<S: CourseStore>(&mut self, store: &S) -> Submission {
        let Some(course) = self.validate() else {
            return Submission::Invalid;
        };

        let (result, verb) = match &self.mode {
            FormMode::Create => (store.create(&course).await, "creating"),
            FormMode::Edit(id) => (store.update(id, &course).await, "updating"),
        };

        match result {
            Ok(saved) => {
                info!(id = %saved.id, course = %saved, "course saved");
                let done = match self.mode {
                    FormMode::Create => "created",
                    FormMode::Edit(_) => "updated",
                };
                self.reset();
                self.notice = Some(Notice::Success(format!("Course {} successfully", done)));
                Submission::Saved(saved)
            }
            Err(e) => {
                error!(%e, "error {} course", verb);
                self.notice = Some(Notice::Failure(format!("Error {} course: {}", verb, e)));
                Submission::Failed
            }
        }
    }
}
