use serde::Deserialize;

use crate::web::{
    auth::{LOGGED_OUT, LOGIN_OK},
    responses::Notice,
};

#[derive(Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
}

impl DashboardQuery {
    pub fn notice(&self) -> Option<Notice> {
        match self.status.as_deref()? {
            "logged_in" => Some(LOGIN_OK),
            "logged_out" => Some(LOGGED_OUT),
            _ => None,
        }
    }
}
