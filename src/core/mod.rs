// Core module - Session lifecycle and data paths
pub mod communication;
pub mod session;
