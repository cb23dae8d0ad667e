use super::{Config, DisplayServer};
use crate::errors::Result;
use crate::DisplayEvent;

#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer;

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self)
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        vec![]
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        unimplemented!()
    }

    fn flush(&self) {
        unimplemented!()
    }
}
