//! Core types for coursetrack: backend records, derived item status, and calendar grids.

pub mod calendar;
pub mod item;
pub mod model;
pub mod status;

pub use calendar::{CalendarError, DayCell, MonthGrid, build_month};
pub use item::{ResolvedAssignment, ResolvedItem, ResolvedQuiz, sort_for_display};
pub use model::{
    Assignment, AssignmentResult, CalendarEvent, Course, EventKind, Lesson, Quiz, QuizResult,
    Submission,
};
pub use status::{
    AssignmentStatus, QuizStatus, Viewer, resolve_assignment, resolve_assignment_for_teacher,
    resolve_quiz, resolve_quiz_for_teacher,
};
