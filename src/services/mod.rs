pub mod attendance_service;
pub mod employee_service;
