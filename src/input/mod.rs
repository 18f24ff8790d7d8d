//! Input processing module
//! Handles file detection, PDF text extraction, and upload management

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
