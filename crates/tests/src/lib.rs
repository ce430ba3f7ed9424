#[cfg(test)]
mod common;

#[cfg(test)]
mod school_list_tests;

#[cfg(test)]
mod school_get_tests;

#[cfg(test)]
mod school_create_tests;

#[cfg(test)]
mod school_update_tests;

#[cfg(test)]
mod school_delete_tests;

#[cfg(test)]
mod school_export_tests;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod openapi_tests;
