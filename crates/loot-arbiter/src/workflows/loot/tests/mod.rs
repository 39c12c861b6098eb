mod common;
mod roller;
