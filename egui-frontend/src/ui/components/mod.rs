pub mod expense_form;
pub mod expense_list;
pub mod filter_bar;
pub mod summary_panel;
