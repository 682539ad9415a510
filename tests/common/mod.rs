#![allow(dead_code)]

pub mod command;
pub mod docx;
