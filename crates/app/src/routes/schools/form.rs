use std::collections::{HashMap, HashSet};

use base64::Engine as _;
use dioxus::html::FileData;
use dioxus::prelude::*;
use shared_types::{AppError, LogoUpload, School, SchoolFormData, LOGO_CONTENT_TYPES, MAX_LOGO_BYTES};
use shared_ui::{
    Button, ButtonVariant, FileDropZone, Form, FormActions, FormField, Input, LabeledSwitch,
};
use validator::Validate;

pub const LOGO_HINT: &str = "SVG, PNG, JPG (max. 2MB)";

/// Per-field messages for the current values, judged after trimming.
/// Empty when the form is valid.
pub fn field_errors(form: &SchoolFormData) -> HashMap<String, String> {
    match form.normalized().validate() {
        Ok(()) => HashMap::new(),
        Err(errors) => AppError::from(errors).field_errors,
    }
}

/// Fields whose errors are on display: blurred ones, or all after a submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Touched {
    fields: HashSet<&'static str>,
    submitted: bool,
}

impl Touched {
    pub fn blur(&mut self, field: &'static str) {
        self.fields.insert(field);
    }

    pub fn submit(&mut self) {
        self.submitted = true;
    }

    pub fn shows(&self, field: &str) -> bool {
        self.submitted || self.fields.contains(field)
    }
}

/// Check a picked file's type and size before reading it.
pub fn check_logo(content_type: &str, size: usize) -> Result<(), String> {
    if !LOGO_CONTENT_TYPES.contains(&content_type) {
        return Err("Logo must be an SVG, PNG or JPG image.".to_string());
    }
    if size > MAX_LOGO_BYTES {
        return Err("Logo must be 2MB or smaller.".to_string());
    }
    Ok(())
}

pub fn logo_upload(
    file_name: String,
    content_type: String,
    bytes: &[u8],
) -> Result<LogoUpload, String> {
    check_logo(&content_type, bytes.len())?;
    Ok(LogoUpload {
        file_name,
        content_type,
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

fn preview_url(logo: &LogoUpload) -> String {
    format!("data:{};base64,{}", logo.content_type, logo.data)
}

/// Image to show in the drop zone: a freshly picked file wins over the
/// stored logo, which stays in place until a replacement is saved.
pub fn logo_preview(form: &SchoolFormData, stored: Option<&str>) -> Option<String> {
    form.logo
        .as_ref()
        .map(preview_url)
        .or_else(|| stored.map(str::to_string))
}

async fn read_logo(file: FileData) -> Result<LogoUpload, String> {
    let content_type = file.content_type().unwrap_or_default();
    check_logo(&content_type, file.size() as usize)?;
    let bytes = file
        .read_bytes()
        .await
        .map_err(|_| "Failed to read file.".to_string())?;
    logo_upload(file.name(), content_type, &bytes)
}

/// Add/edit form for a school. With `initial` set every field is pre-filled
/// and an untouched logo keeps the stored one.
#[component]
pub fn SchoolForm(
    #[props(default)] initial: Option<School>,
    is_submitting: bool,
    on_submit: EventHandler<SchoolFormData>,
    on_cancel: EventHandler<()>,
) -> Element {
    let editing = initial.is_some();
    let stored_logo = initial.as_ref().and_then(|s| s.logo.clone());

    let mut form = use_signal(|| {
        initial
            .as_ref()
            .map(SchoolFormData::from_school)
            .unwrap_or_default()
    });
    let mut logo_error = use_signal(|| None::<String>);
    let mut touched = use_signal(Touched::default);
    let errors = use_memo(move || field_errors(&form.read()));

    let shown_error = move |field: &str| -> Option<String> {
        if touched.read().shows(field) {
            errors.read().get(field).cloned()
        } else {
            None
        }
    };

    let accept_files = move |files: Vec<FileData>| {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        spawn(async move {
            match read_logo(file).await {
                Ok(upload) => {
                    form.write().logo = Some(upload);
                    logo_error.set(None);
                }
                Err(message) => logo_error.set(Some(message)),
            }
        });
    };

    let handle_submit = move |_: FormEvent| {
        touched.write().submit();
        if is_submitting || !errors.read().is_empty() || logo_error.read().is_some() {
            return;
        }
        on_submit.call(form.read().normalized());
    };

    rsx! {
        Form { class: "school-form", onsubmit: handle_submit,
            FormField { label: "School Logo",
                FileDropZone {
                    title: "Drag & drop or click to upload school logo",
                    hint: LOGO_HINT.to_string(),
                    accept: "image/*",
                    preview: logo_preview(&form.read(), stored_logo.as_deref()),
                    remove_label: "Remove logo",
                    removable: form.read().logo.is_some(),
                    disabled: is_submitting,
                    on_select: move |evt: FormEvent| accept_files(evt.files()),
                    on_drop: move |evt: DragEvent| accept_files(evt.files()),
                    on_remove: move |_| {
                        form.write().logo = None;
                        logo_error.set(None);
                    },
                }
                if let Some(message) = logo_error() {
                    p { class: "input-error", role: "alert", "{message}" }
                }
            }

            div { class: "school-form-grid",
                Input {
                    label: "School Name*",
                    id: "school-name",
                    placeholder: "Enter school name",
                    value: form.read().name.clone(),
                    error: shown_error("name"),
                    disabled: is_submitting,
                    on_input: move |e: FormEvent| form.write().name = e.value(),
                    on_blur: move |_| touched.write().blur("name"),
                }
                Input {
                    label: "Email Address*",
                    id: "school-email",
                    input_type: "email",
                    placeholder: "school@example.com",
                    value: form.read().email.clone(),
                    error: shown_error("email"),
                    disabled: is_submitting,
                    on_input: move |e: FormEvent| form.write().email = e.value(),
                    on_blur: move |_| touched.write().blur("email"),
                }
                Input {
                    label: "Phone Number",
                    id: "school-phone",
                    input_type: "tel",
                    placeholder: "+1 (123) 456-7890",
                    value: form.read().phone.clone(),
                    disabled: is_submitting,
                    on_input: move |e: FormEvent| form.write().phone = e.value(),
                }
                div { class: "school-form-status",
                    LabeledSwitch {
                        label: "Active Status",
                        checked: form.read().status,
                        disabled: is_submitting,
                        on_change: move |active: bool| form.write().status = active,
                    }
                    p { class: "form-field-hint", "School will be visible to users when active" }
                }
            }

            FormField { label: "Address*",
                textarea {
                    class: "input school-form-address",
                    id: "school-address",
                    placeholder: "Enter full address",
                    rows: "3",
                    disabled: is_submitting,
                    value: "{form.read().address}",
                    "aria-invalid": if shown_error("address").is_some() { "true" } else { "false" },
                    oninput: move |e: FormEvent| form.write().address = e.value(),
                    onblur: move |_| touched.write().blur("address"),
                }
                if let Some(message) = shown_error("address") {
                    p { class: "input-error", role: "alert", "{message}" }
                }
            }

            FormActions {
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: is_submitting,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    button_type: "submit",
                    disabled: is_submitting,
                    if is_submitting {
                        "Saving..."
                    } else if editing {
                        "Update School"
                    } else {
                        "Add School"
                    }
                }
            }
        }
    }
}
