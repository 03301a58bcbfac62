//! Profile boxes: storage ports, default seeding and the page-level service

pub mod ports;
pub mod seeder;
pub mod service;
