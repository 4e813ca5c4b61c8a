pub mod lead_form;
