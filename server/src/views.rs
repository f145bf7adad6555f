//! HTML views. Handlers build a view model and these functions turn it into
//! markup; every interpolated value goes through [`escape`].

use std::fmt::Write as _;

use platform_db::employees::Employee;
use products_hr::{
    FIRST_NAME, HIRING_DATE, MAX_NAME_LEN, MAX_SPECIALIZATION_LEN, RawForm, SECOND_NAME,
    SPECIALIZATION, ValidationError, today,
};

pub struct IndexView<'a> {
    pub notice: Option<String>,
    pub employees: &'a [Employee],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/add".to_string(),
            FormMode::Edit(id) => format!("/edit/{id}"),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add employee",
            FormMode::Edit(_) => "Edit employee",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Add",
            FormMode::Edit(_) => "Update",
        }
    }
}

/// Values shown in the create/edit form, kept as raw text so a rejected
/// submission can be echoed back unchanged.
#[derive(Clone, Debug)]
pub struct FormView {
    pub mode: FormMode,
    pub first_name: String,
    pub second_name: String,
    pub hiring_date: String,
    pub specialization: String,
    pub error: Option<String>,
}

impl FormView {
    /// Empty create form; the hiring date defaults to the day of the request.
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Create,
            first_name: String::new(),
            second_name: String::new(),
            hiring_date: today().to_string(),
            specialization: String::new(),
            error: None,
        }
    }

    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            mode: FormMode::Edit(employee.id),
            first_name: employee.first_name.clone(),
            second_name: employee.second_name.clone(),
            hiring_date: employee.hiring_date.to_string(),
            specialization: employee.specialization.clone(),
            error: None,
        }
    }

    pub fn rejected(mode: FormMode, form: &RawForm, error: &ValidationError) -> Self {
        let field = |name: &str| form.get(name).cloned().unwrap_or_default();
        Self {
            mode,
            first_name: field(FIRST_NAME),
            second_name: field(SECOND_NAME),
            hiring_date: field(HIRING_DATE),
            specialization: field(SPECIALIZATION),
            error: Some(error.to_string()),
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, notice: Option<&str>, body: &str) -> String {
    let notice = notice
        .map(|msg| format!("<div class=\"flash\" role=\"status\">{}</div>\n", escape(msg)))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Employee Roster</title>\n</head>\n<body>\n\
         <header><a href=\"/\">Employee Roster</a></header>\n<main>\n\
         <h1>{title}</h1>\n{notice}{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn index(view: &IndexView<'_>) -> String {
    let mut body = String::from("<p><a href=\"/add\">Add employee</a></p>\n");
    if view.employees.is_empty() {
        body.push_str("<p class=\"empty\">The roster is empty.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>First name</th><th>Second name</th>\
             <th>Hiring date</th><th>Specialization</th><th></th></tr></thead>\n<tbody>\n",
        );
        for employee in view.employees {
            let _ = write!(
                body,
                "<tr><td>{id}</td><td>{first}</td><td>{second}</td><td>{date}</td><td>{spec}</td>\
                 <td><a href=\"/edit/{id}\">Edit</a> \
                 <form method=\"post\" action=\"/delete/{id}\" class=\"inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>\n",
                id = employee.id,
                first = escape(&employee.first_name),
                second = escape(&employee.second_name),
                date = employee.hiring_date,
                spec = escape(&employee.specialization),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    layout("Employees", view.notice.as_deref(), &body)
}

pub fn employee_form(view: &FormView) -> String {
    let mut body = String::new();
    if let Some(error) = &view.error {
        let _ = writeln!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape(error));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\">\n\
         <label>First name <input name=\"{first_key}\" value=\"{first}\" maxlength=\"{name_max}\" required></label>\n\
         <label>Second name <input name=\"{second_key}\" value=\"{second}\" maxlength=\"{name_max}\" required></label>\n\
         <label>Hiring date <input type=\"date\" name=\"{date_key}\" value=\"{date}\" required></label>\n\
         <label>Specialization <input name=\"{spec_key}\" value=\"{spec}\" maxlength=\"{spec_max}\"></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>\n",
        action = view.mode.action(),
        first_key = FIRST_NAME,
        first = escape(&view.first_name),
        second_key = SECOND_NAME,
        second = escape(&view.second_name),
        date_key = HIRING_DATE,
        date = escape(&view.hiring_date),
        spec_key = SPECIALIZATION,
        spec = escape(&view.specialization),
        name_max = MAX_NAME_LEN,
        spec_max = MAX_SPECIALIZATION_LEN,
        submit = view.mode.submit_label(),
    );
    layout(view.mode.title(), None, &body)
}
