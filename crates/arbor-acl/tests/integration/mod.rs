mod config;
mod ordering;
mod persistence;
