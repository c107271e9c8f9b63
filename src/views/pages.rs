use super::{contact_path, edit_contact_path, escape, layout};
use crate::models::{AddContactForm, Contact, EditContactForm};
use crate::validation::ValidationErrors;
use std::fmt::Write;

/// Which contact form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
}

impl FormMode {
    fn title(&self) -> &'static str {
        match self {
            Self::Add => "Add Contact Form",
            Self::Edit => "Edit Contact Form",
        }
    }

    fn action(&self) -> &'static str {
        match self {
            Self::Add => "/contact",
            Self::Edit => "/contact?_method=PUT",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Self::Add => "Add Contact",
            Self::Edit => "Save Changes",
        }
    }
}

/// Values pre-filled into a contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormValues {
    pub id: String,
    pub old_name: String,
    pub name: String,
    pub phonenum: String,
    pub email: String,
}

impl From<&Contact> for ContactFormValues {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            old_name: contact.name.clone(),
            name: contact.name.clone(),
            phonenum: contact.phone_number.clone(),
            email: contact.email.clone().unwrap_or_default(),
        }
    }
}

impl From<&AddContactForm> for ContactFormValues {
    fn from(form: &AddContactForm) -> Self {
        Self {
            name: form.name.clone(),
            phonenum: form.phonenum.clone(),
            email: form.email.clone(),
            ..Default::default()
        }
    }
}

impl From<&EditContactForm> for ContactFormValues {
    fn from(form: &EditContactForm) -> Self {
        Self {
            id: form.id.clone(),
            old_name: form.old_name.clone(),
            name: form.name.clone(),
            phonenum: form.phonenum.clone(),
            email: form.email.clone(),
        }
    }
}

pub fn home_page(owner: &str) -> String {
    let body = format!(
        r#"<h1 class="mb-3">Hello, I'm {}</h1>
<p class="lead">Keep your contacts in one place.</p>
<a class="btn btn-primary" href="/contact">See contacts</a>"#,
        escape(owner)
    );
    layout("Homepage", &body)
}

pub fn about_page() -> String {
    let body = r#"<h1 class="mb-3">About</h1>
<p>A small contact book: list, add, edit and delete people with their phone number and email.</p>"#;
    layout("About Page", body)
}

/// The contact list, with the pending flash message (if any) above it.
pub fn contact_list_page(contacts: &[Contact], flash: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(message) = flash {
        let _ = write!(
            body,
            r#"<div class="alert alert-success" role="alert">{}</div>"#,
            escape(message)
        );
    }

    body.push_str(
        r#"<h2 class="mb-3">Contact List</h2>
<a class="btn btn-primary mb-3" href="/contact/add">Add Contact</a>
"#,
    );

    if contacts.is_empty() {
        body.push_str(r#"<div class="alert alert-info">No contacts yet.</div>"#);
        return layout("Contact Page", &body);
    }

    body.push_str(
        r#"<table class="table">
<thead><tr><th scope="col">#</th><th scope="col">Name</th><th scope="col">Phone Number</th><th scope="col"></th></tr></thead>
<tbody>
"#,
    );
    for (i, contact) in contacts.iter().enumerate() {
        let _ = writeln!(
            body,
            r#"<tr><th scope="row">{}</th><td>{}</td><td>{}</td><td><a class="btn btn-success btn-sm" href="{}">Detail</a></td></tr>"#,
            i + 1,
            escape(&contact.name),
            escape(&contact.phone_number),
            escape(&contact_path(&contact.name)),
        );
    }
    body.push_str("</tbody>\n</table>");

    layout("Contact Page", &body)
}

/// The add or edit form, optionally listing validation failures above it.
pub fn contact_form_page(
    mode: FormMode,
    values: &ContactFormValues,
    errors: Option<&ValidationErrors>,
) -> String {
    let mut body = String::new();
    let _ = writeln!(body, r#"<h2 class="mb-3">{}</h2>"#, mode.title());

    if let Some(errors) = errors.filter(|e| !e.is_empty()) {
        body.push_str(r#"<div class="alert alert-danger" role="alert"><ul class="mb-0">"#);
        for error in errors {
            let _ = write!(body, "<li>{}</li>", escape(&error.message));
        }
        body.push_str("</ul></div>\n");
    }

    let _ = writeln!(body, r#"<form method="post" action="{}">"#, mode.action());
    if mode == FormMode::Edit {
        let _ = writeln!(
            body,
            r#"<input type="hidden" name="_id" value="{}">
<input type="hidden" name="oldName" value="{}">"#,
            escape(&values.id),
            escape(&values.old_name),
        );
    }
    let _ = write!(
        body,
        r#"<div class="form-group">
<label for="name">Name</label>
<input type="text" class="form-control" id="name" name="name" value="{name}" required>
</div>
<div class="form-group">
<label for="phonenum">Phone Number</label>
<input type="text" class="form-control" id="phonenum" name="phonenum" value="{phonenum}" required>
</div>
<div class="form-group">
<label for="email">Email</label>
<input type="email" class="form-control" id="email" name="email" value="{email}">
</div>
<button type="submit" class="btn btn-primary">{label}</button>
<a class="btn btn-link" href="/contact">Back</a>
</form>"#,
        name = escape(&values.name),
        phonenum = escape(&values.phonenum),
        email = escape(&values.email),
        label = mode.submit_label(),
    );

    layout(mode.title(), &body)
}

/// One contact's details with edit and delete controls.
pub fn contact_detail_page(contact: &Contact) -> String {
    let email = contact
        .email
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "-".to_string());

    let body = format!(
        r#"<div class="card">
<div class="card-body">
<h5 class="card-title">{name}</h5>
<h6 class="card-subtitle mb-2 text-muted">{phone}</h6>
<p class="card-text">{email}</p>
<a class="btn btn-success" href="{edit}">Edit</a>
<form method="post" action="/contact?_method=DELETE" class="d-inline">
<input type="hidden" name="name" value="{name}">
<button type="submit" class="btn btn-danger" onclick="return confirm('Delete this contact?');">Delete</button>
</form>
<a class="btn btn-link" href="/contact">Back to contact list</a>
</div>
</div>"#,
        name = escape(&contact.name),
        phone = escape(&contact.phone_number),
        email = email,
        edit = escape(&edit_contact_path(&contact.name)),
    );
    layout("Contact's Detail Page", &body)
}

pub fn not_found_page(message: &str) -> String {
    let body = format!(
        r#"<h2 class="mb-3">Not Found</h2>
<p>{}</p>
<a class="btn btn-primary" href="/contact">Back to contact list</a>"#,
        escape(message)
    );
    layout("Not Found", &body)
}

pub fn server_error_page() -> String {
    layout(
        "Server Error",
        r#"<h2 class="mb-3">Something went wrong</h2>
<p>The contact store could not be reached. Please try again later.</p>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactId;
    use crate::models::ContactFields;
    use crate::validation::{FieldError, PHONE_INVALID};

    fn contact(name: &str) -> Contact {
        Contact::from_fields(
            ContactId::new("abc123").unwrap(),
            ContactFields::new(name, "081234567890", Some("a@b.com".to_string())),
        )
    }

    #[test]
    fn test_list_shows_flash_and_links() {
        let html = contact_list_page(&[contact("Kim Hyewon")], Some("New contact added!"));
        assert!(html.contains("New contact added!"));
        assert!(html.contains("Kim Hyewon"));
        assert!(html.contains(r#"href="/contact/Kim%20Hyewon""#));
    }

    #[test]
    fn test_empty_list() {
        let html = contact_list_page(&[], None);
        assert!(html.contains("No contacts yet."));
        assert!(!html.contains("alert-success"));
    }

    #[test]
    fn test_list_escapes_names() {
        let html = contact_list_page(&[contact("<b>bold</b>")], None);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_add_form_keeps_values_and_lists_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new("phonenum", PHONE_INVALID, "123"));
        let values = ContactFormValues {
            name: "Hyewon".to_string(),
            phonenum: "123".to_string(),
            ..Default::default()
        };

        let html = contact_form_page(FormMode::Add, &values, Some(&errors));
        assert!(html.contains(PHONE_INVALID));
        assert!(html.contains(r#"value="Hyewon""#));
        assert!(html.contains(r#"value="123""#));
        assert!(html.contains(r#"action="/contact""#));
        assert!(!html.contains("oldName"));
    }

    #[test]
    fn test_edit_form_carries_id_and_old_name() {
        let values = ContactFormValues::from(&contact("Hyewon"));
        let html = contact_form_page(FormMode::Edit, &values, None);

        assert!(html.contains(r#"action="/contact?_method=PUT""#));
        assert!(html.contains(r#"name="_id" value="abc123""#));
        assert!(html.contains(r#"name="oldName" value="Hyewon""#));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn test_detail_has_edit_and_delete() {
        let html = contact_detail_page(&contact("Kim Hyewon"));
        assert!(html.contains(r#"href="/contact/edit/Kim%20Hyewon""#));
        assert!(html.contains(r#"action="/contact?_method=DELETE""#));
        assert!(html.contains("a@b.com"));
    }
}
