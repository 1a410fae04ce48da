pub(crate) mod email_controller;
pub(crate) mod health_check_controller;
pub(crate) mod summary_controller;
pub(crate) mod transcript_controller;
