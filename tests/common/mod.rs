use async_trait::async_trait;
use std::sync::Mutex;
use wbnode::error::AppError;
use wbnode::hub::NodeLink;
use wbnode::nodes::DriverValue;

/// Hub link that records everything published to it.
#[derive(Default)]
pub struct RecordingLink {
    pub nodes: Mutex<Vec<(String, String, String)>>,
    pub reports: Mutex<Vec<(String, DriverValue)>>,
    pub notices: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NodeLink for RecordingLink {
    async fn add_node(&self, address: &str, node_id: &str, name: &str) -> Result<(), AppError> {
        self.nodes.lock().unwrap().push((address.to_owned(), node_id.to_owned(), name.to_owned()));
        Ok(())
    }

    async fn report(&self, address: &str, value: &DriverValue) -> Result<(), AppError> {
        self.reports.lock().unwrap().push((address.to_owned(), value.clone()));
        Ok(())
    }

    async fn send_notice(&self, key: &str, text: &str) -> Result<(), AppError> {
        self.notices.lock().unwrap().push((key.to_owned(), text.to_owned()));
        Ok(())
    }

    async fn clear_notices(&self) -> Result<(), AppError> {
        self.notices.lock().unwrap().clear();
        Ok(())
    }
}
