//! Locators and bounded-wait helpers for the upload pages.

use std::time::Duration;

use ab::driver::{Element, Session};
use ab::Result;

use crate::DEFAULT_TIMEOUT;

/// File input on the main page.
pub const FILE_INPUT: &str = "//input[@type='file']";
/// Upload settings block next to the input.
pub const UPLOAD_SETTINGS: &str = "//div[contains(@class, 'upload_settings')]";
/// Submit button that starts the upload.
pub const UPLOAD_BUTTON: &str = "//input[@type='submit' and @id='uploadButton']";
/// Tab link switching to upload-by-URL mode.
pub const URL_TAB_LINK: &str = "//a[@id='switch_to_copy']";
/// Textarea accepting remote image URLs.
pub const URL_TEXTAREA: &str = "//textarea[@id='upload_files']";
/// Result block shown once an upload completes.
pub const PIC_INFO: &str = "//div[contains(@class, 'picinfo')]";
/// Share-link inputs listed under a completed upload.
pub const CODES_LIST_INPUTS: &str = "//ul[contains(@class, 'codes-list')]//input";

/// Waits for an element with the suite default timeout.
pub async fn find_by_xpath(session: &mut Session, xpath: &str) -> Result<Element> {
	find_by_xpath_within(session, xpath, DEFAULT_TIMEOUT).await
}

/// Waits for an element with an explicit bound.
pub async fn find_by_xpath_within(session: &mut Session, xpath: &str, timeout: Duration) -> Result<Element> {
	session.find_element(xpath, timeout).await
}

/// Clicks an element with the suite default timeout.
pub async fn click_by_xpath(session: &mut Session, xpath: &str) -> Result<()> {
	session.click(xpath, DEFAULT_TIMEOUT).await
}

/// Types `text` into an element with the suite default timeout.
pub async fn type_into(session: &mut Session, xpath: &str, text: &str) -> Result<()> {
	session.send_keys(xpath, text, DEFAULT_TIMEOUT).await
}
