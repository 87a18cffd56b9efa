mod command;
mod log;
