// Export components
pub mod calendar;

// Re-export the calendar cache handle
pub use calendar::CalendarHandle;
