mod commands;
mod event_queue;
