#![allow(dead_code)]

pub mod recipes;
