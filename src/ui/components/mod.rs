pub mod form_field;
pub mod report_view;
pub mod toast;
