use std::sync::OnceLock;

use regex::Regex;

use crate::shared::errors::AppError;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 80;
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 5.0;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern is a valid regex")
    })
}

pub struct Validator;

impl Validator {
    pub fn validate_movie_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        let chars = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
            return Err(AppError::ValidationError(format!(
                "Title must have between {} and {} characters",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            )));
        }
        Ok(())
    }

    pub fn validate_image_url(image: &str) -> Result<(), AppError> {
        if !url_pattern().is_match(image) {
            return Err(AppError::ValidationError(format!(
                "Image must be a valid URL: '{}'",
                image
            )));
        }
        Ok(())
    }

    pub fn validate_score(score: f64) -> Result<(), AppError> {
        if !score.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            return Err(AppError::ValidationError(format!(
                "Score must be between {} and {}",
                SCORE_MIN, SCORE_MAX
            )));
        }
        Ok(())
    }
}
