pub mod assignments;

pub mod attendance;

pub mod auth;

pub mod classes;

pub mod exams;

pub mod lessons;

pub mod messages;

pub mod people;

pub mod results;

pub mod stats;

pub mod subjects;

pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use exams::configure_exams_routes;
pub use lessons::configure_lessons_routes;
pub use messages::configure_messages_routes;
pub use people::configure_people_routes;
pub use results::configure_results_routes;
pub use stats::configure_stats_routes;
pub use subjects::configure_subjects_routes;
