use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdFileText, LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{
    truncate_text, ExportFormat, School, SchoolFormData, StatusFilter, ROWS_PER_PAGE_OPTIONS,
    SORT_OPTIONS, STATUS_FILTERS,
};
use shared_ui::{
    notify_error, notify_success, use_toast, AlertDialogActions, AlertDialogCancel,
    AlertDialogContent, AlertDialogDescription, AlertDialogRoot, AlertDialogTitle, Badge,
    BadgeVariant, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableFooter, DataTableHeader, DataTableRow, DialogContent, DialogDescription, DialogRoot,
    DialogTitle, DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuLabel,
    DropdownMenuTrigger, EmptyState, ErrorBanner, FormSelect, PageActions, PageHeader, PageTitle,
    Pagination, SearchBar, SearchInput, TableSkeleton, Toasts,
};

use super::controller::{
    ListCache, ListControls, MutationKind, MutationState, EXPORT_BLOCKED_MESSAGE, LOAD_ERROR_MESSAGE,
};
use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::form::SchoolForm;
use super::service::{self, ServiceError};
use crate::auth::use_auth;
use crate::routes::Route;

const ADDRESS_PREVIEW_CHARS: usize = 30;
const TABLE_COLUMNS: usize = 9;

fn notify_outcome<T>(toasts: Toasts, kind: MutationKind, result: &Result<T, ServiceError>) {
    match result {
        Ok(_) => {
            let notice = kind.success_notice();
            notify_success(toasts, notice.title, &notice.description);
        }
        Err(err) => {
            tracing::warn!(?kind, "School mutation failed: {err}");
            let notice = kind.failure_notice(err);
            notify_error(toasts, notice.title, &notice.description);
        }
    }
}

/// Open an export in a new browsing context. Fails when the URL cannot be
/// handed to the page or the browser refuses the new window.
async fn open_in_new_tab(url: &str) -> Result<(), ServiceError> {
    let quoted = serde_json::to_string(url).map_err(|e| {
        tracing::error!("Could not encode export url: {e}");
        ServiceError::Transport(e.to_string())
    })?;
    let opened = document::eval(&format!("return window.open({quoted}, '_blank') !== null;"))
        .join::<bool>()
        .await;
    match opened {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::warn!(%url, "Export window was blocked");
            Err(ServiceError::Transport(EXPORT_BLOCKED_MESSAGE.to_string()))
        }
        Err(e) => {
            tracing::error!(%url, "Opening the export failed: {e}");
            Err(ServiceError::Transport(EXPORT_BLOCKED_MESSAGE.to_string()))
        }
    }
}

/// Schools list: filter bar, export menu, paginated table and the
/// add/edit/delete dialogs.
#[component]
pub fn SchoolsPage() -> Element {
    let mut auth = use_auth();
    let toasts = use_toast();

    let mut controls = use_signal(ListControls::default);
    let mut cache = use_signal(ListCache::default);
    let mut search_text = use_signal(String::new);
    let debouncer = use_hook(|| Debouncer::new(SEARCH_DEBOUNCE));

    let mut show_add = use_signal(|| false);
    let mut editing = use_signal(|| None::<School>);
    let mut deleting = use_signal(|| None::<School>);

    let mut create_state = use_signal(MutationState::default);
    let mut update_state = use_signal(MutationState::default);
    let mut delete_state = use_signal(MutationState::default);
    let mut export_state = use_signal(MutationState::default);

    {
        let debouncer = debouncer.clone();
        use_drop(move || debouncer.cancel());
    }

    let filter = use_memo(move || controls.read().filter.clone());
    let epoch = use_memo(move || cache.read().epoch());

    // Refetch whenever the committed filter changes or a mutation invalidates the list.
    use_effect(move || {
        let _ = epoch();
        let ticket = cache.write().begin(filter());
        spawn(async move {
            let result = service::get_schools(ticket.filter().clone()).await;
            if let Err(err) = &result {
                tracing::error!("Failed to load schools: {err}");
            }
            if !cache.write().complete(&ticket, result) {
                tracing::debug!("Discarded stale schools result");
            }
        });
    });

    let on_search = {
        let debouncer = debouncer.clone();
        move |value: String| {
            search_text.set(value);
            let ticket = debouncer.schedule();
            spawn(async move {
                if ticket.wait().await {
                    controls.write().commit_search(search_text());
                }
            });
        }
    };

    let handle_create = move |form: SchoolFormData| {
        if !create_state.write().begin() {
            return;
        }
        spawn(async move {
            let result = service::create_school(form).await;
            create_state.write().settle(&result);
            if result.is_ok() {
                cache.write().invalidate();
                show_add.set(false);
            }
            notify_outcome(toasts, MutationKind::Create, &result);
        });
    };

    let handle_update = move |form: SchoolFormData| {
        let Some(id) = editing.read().as_ref().map(|s| s.id.clone()) else {
            return;
        };
        if !update_state.write().begin() {
            return;
        }
        spawn(async move {
            let result = service::update_school(id, form).await;
            update_state.write().settle(&result);
            if result.is_ok() {
                cache.write().invalidate();
                editing.set(None);
            }
            notify_outcome(toasts, MutationKind::Update, &result);
        });
    };

    let handle_delete = move |_| {
        let Some(id) = deleting.read().as_ref().map(|s| s.id.clone()) else {
            return;
        };
        if !delete_state.write().begin() {
            return;
        }
        spawn(async move {
            let result = service::delete_school(id).await;
            delete_state.write().settle(&result);
            if result.is_ok() {
                cache.write().invalidate();
                deleting.set(None);
            }
            notify_outcome(toasts, MutationKind::Delete, &result);
        });
    };

    let handle_export = move |format: ExportFormat| {
        if !export_state.write().begin() {
            return;
        }
        spawn(async move {
            let result = match service::export_schools(format).await {
                Ok(url) => open_in_new_tab(&url).await,
                Err(err) => Err(err),
            };
            export_state.write().settle(&result);
            notify_outcome(toasts, MutationKind::Export, &result);
        });
    };

    // Edit works on a fresh copy of the record, not the cached row.
    let open_edit = move |id: String| {
        spawn(async move {
            match service::get_school(id.clone()).await {
                Ok(Some(school)) => editing.set(Some(school)),
                Ok(None) => {
                    let err = ServiceError::NotFound(format!("School {} not found", id));
                    notify_outcome::<()>(toasts, MutationKind::Update, &Err(err));
                }
                Err(err) => notify_outcome::<()>(toasts, MutationKind::Update, &Err(err)),
            }
        });
    };

    let handle_sign_out = move |_| {
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!("Sign out failed: {e}");
            }
            auth.sign_out();
        });
    };

    let total = cache.read().rows().len();
    let page = controls.read().current_page(total);
    let page_count = controls.read().page_count(total);
    let showing = controls.read().showing(total);
    let rows_per_page = controls.read().rows_per_page();
    let visible: Vec<School> = controls.read().visible(cache.read().rows()).to_vec();
    let load_error = cache.read().error().is_some();
    let show_skeleton = cache.read().show_skeleton();
    let show_empty = cache.read().show_empty();

    let status_options: Vec<(String, String)> = STATUS_FILTERS
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let sort_options: Vec<(String, String)> = SORT_OPTIONS
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect();
    let per_page_options: Vec<(String, String)> = ROWS_PER_PAGE_OPTIONS
        .iter()
        .map(|n| (n.to_string(), n.to_string()))
        .collect();

    let delete_name = deleting.read().as_ref().map(|s| s.name.clone()).unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./schools.css") }
        div { class: "schools-page",
            PageHeader {
                PageTitle { subtitle: "Add, update and remove the schools in your district.".to_string(),
                    "Manage Schools"
                }
                PageActions {
                    match auth.current_user.read().as_ref() {
                        Some(user) => rsx! {
                            span { class: "schools-user", "{user.display_name}" }
                            if !auth.can_write() {
                                Badge { variant: BadgeVariant::Secondary, "Read only" }
                            }
                            Button { variant: ButtonVariant::Ghost, onclick: handle_sign_out, "Sign Out" }
                        },
                        None => rsx! {
                            Link { class: "schools-sign-in", to: Route::Login { redirect: None }, "Sign In" }
                        },
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_add.set(true),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "Add New School"
                    }
                }
            }

            SearchBar {
                SearchInput {
                    value: search_text(),
                    placeholder: "Search by School Name, Email, or Phone...",
                    on_input: on_search,
                }
                FormSelect {
                    label: "Status",
                    value: filter.read().status.as_str().to_string(),
                    options: status_options,
                    on_change: move |v: String| {
                        controls.write().set_status(StatusFilter::from_str_or_default(&v))
                    },
                }
                FormSelect {
                    label: "Sort by",
                    value: filter.read().sort_key(),
                    options: sort_options,
                    on_change: move |v: String| controls.write().set_sort_key(&v),
                }
                DropdownMenu {
                    DropdownMenuTrigger {
                        div { class: "schools-export-trigger",
                            Icon::<LdDownload> { icon: LdDownload, width: 16, height: 16 }
                            if export_state.read().is_pending() { "Exporting..." } else { "Export" }
                        }
                    }
                    DropdownMenuContent {
                        DropdownMenuLabel { "Export Format" }
                        for (index, format) in ExportFormat::ALL.into_iter().enumerate() {
                            DropdownMenuItem::<ExportFormat> {
                                key: "{format.as_str()}",
                                value: format,
                                index,
                                on_select: handle_export,
                                div { class: "schools-export-item",
                                    Icon::<LdFileText> { icon: LdFileText, width: 14, height: 14 }
                                    "{format.menu_label()}"
                                }
                            }
                        }
                    }
                }
            }

            if load_error {
                ErrorBanner { message: LOAD_ERROR_MESSAGE.to_string() }
            } else if show_skeleton {
                TableSkeleton { rows: rows_per_page, columns: TABLE_COLUMNS }
            } else if show_empty {
                EmptyState {
                    title: "No schools found",
                    description: "No schools match your current filters, or no schools have been added yet.".to_string(),
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_add.set(true),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "Add New School"
                    }
                }
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "School Name" }
                        DataTableColumn { "Email" }
                        DataTableColumn { "Phone" }
                        DataTableColumn { "Address" }
                        DataTableColumn { numeric: true, "Classes" }
                        DataTableColumn { numeric: true, "Admins" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Created On" }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        for school in visible {
                            SchoolRowView {
                                key: "{school.id}",
                                school: school.clone(),
                                on_edit: open_edit,
                                on_delete: move |s: School| deleting.set(Some(s)),
                            }
                        }
                    }
                }
                DataTableFooter {
                    div { class: "schools-footer-size",
                        FormSelect {
                            label: "Rows per page",
                            value: rows_per_page.to_string(),
                            options: per_page_options,
                            on_change: move |v: String| {
                                if let Ok(n) = v.parse::<usize>() {
                                    controls.write().set_rows_per_page(n);
                                }
                            },
                        }
                        span { class: "schools-footer-range",
                            "Showing {showing.from} to {showing.to} of {showing.total} schools"
                        }
                    }
                    Pagination {
                        page,
                        page_count,
                        on_change: move |p: usize| controls.write().go_to_page(p, total),
                    }
                }
            }
        }

        DialogRoot {
            open: show_add(),
            on_open_change: move |open: bool| show_add.set(open),
            DialogContent {
                DialogTitle { "Add New School" }
                DialogDescription {
                    "Create a new school in the system. Fill in the required information below."
                }
                if show_add() {
                    SchoolForm {
                        is_submitting: create_state.read().is_pending(),
                        on_submit: handle_create,
                        on_cancel: move |_| show_add.set(false),
                    }
                }
            }
        }

        DialogRoot {
            open: editing.read().is_some(),
            on_open_change: move |open: bool| {
                if !open {
                    editing.set(None);
                }
            },
            DialogContent {
                DialogTitle { "Edit School" }
                DialogDescription { "Update the school information. Modify the fields below." }
                if let Some(school) = editing() {
                    SchoolForm {
                        key: "{school.id}",
                        initial: school.clone(),
                        is_submitting: update_state.read().is_pending(),
                        on_submit: handle_update,
                        on_cancel: move |_| editing.set(None),
                    }
                }
            }
        }

        AlertDialogRoot {
            open: deleting.read().is_some(),
            on_open_change: move |open: bool| {
                if !open {
                    deleting.set(None);
                }
            },
            AlertDialogContent {
                AlertDialogTitle { "Are you absolutely sure?" }
                AlertDialogDescription {
                    "Delete {delete_name}? This will permanently remove all associated data, including classes, students, and other records linked to this school. This action cannot be undone."
                }
                AlertDialogActions {
                    AlertDialogCancel { "Cancel" }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: delete_state.read().is_pending(),
                        onclick: handle_delete,
                        if delete_state.read().is_pending() { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}

/// One table row with its edit and delete actions.
#[component]
fn SchoolRowView(
    school: School,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<School>,
) -> Element {
    let phone = school.phone.clone().unwrap_or_default();
    let address = truncate_text(&school.address, ADDRESS_PREVIEW_CHARS);
    let (status_variant, status_label) = if school.status.is_active() {
        (BadgeVariant::Primary, school.status.label())
    } else {
        (BadgeVariant::Outline, school.status.label())
    };
    let id = school.id.clone();
    let target = school.clone();

    rsx! {
        DataTableRow {
            DataTableCell {
                div { class: "schools-name-cell",
                    if let Some(logo) = school.logo.as_ref() {
                        img { class: "schools-logo", src: "{logo}", alt: "" }
                    }
                    span { "{school.name}" }
                }
            }
            DataTableCell {
                a { href: "mailto:{school.email}", "{school.email}" }
            }
            DataTableCell {
                if phone.is_empty() {
                    span { class: "schools-muted", "-" }
                } else {
                    a { href: "tel:{phone}", "{phone}" }
                }
            }
            DataTableCell { title: school.address.clone(), "{address}" }
            DataTableCell { numeric: true, "{school.classes_count}" }
            DataTableCell { numeric: true, "{school.admins_count}" }
            DataTableCell {
                Badge { variant: status_variant, "{status_label}" }
            }
            DataTableCell { "{school.created_date()}" }
            DataTableCell {
                div { class: "schools-row-actions",
                    Button {
                        variant: ButtonVariant::Ghost,
                        "aria-label": "Edit {school.name}",
                        onclick: move |_| on_edit.call(id.clone()),
                        Icon::<LdPencil> { icon: LdPencil, width: 16, height: 16 }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        "aria-label": "Delete {school.name}",
                        onclick: move |_| on_delete.call(target.clone()),
                        Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
                    }
                }
            }
        }
    }
}
