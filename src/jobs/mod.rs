pub mod follow_up_reminder;
