//! Navigation paths.
//!
//! The three views are addressed as `/`, `/{language}` and
//! `/{language}/{lessonSetId}`.

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Language selection.
    Languages,
    /// Lesson-set selection for one language.
    LessonSets { language: String },
    /// A quiz over one lesson set.
    Quiz {
        language: String,
        lesson_set: String,
    },
}

impl Route {
    /// Where "back" leads from this view.
    pub fn parent(&self) -> Route {
        match self {
            Route::Languages | Route::LessonSets { .. } => Route::Languages,
            Route::Quiz { language, .. } => Route::LessonSets {
                language: language.clone(),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Languages => write!(f, "/"),
            Route::LessonSets { language } => write!(f, "/{language}"),
            Route::Quiz {
                language,
                lesson_set,
            } => write!(f, "/{language}/{lesson_set}"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Languages);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        for segment in &segments {
            if segment.is_empty() {
                return Err(RouteError::EmptySegment(s.to_string()));
            }
            if !is_valid_segment(segment) {
                return Err(RouteError::InvalidSegment(segment.to_string()));
            }
        }

        match segments.as_slice() {
            [language] => Ok(Route::LessonSets {
                language: language.to_string(),
            }),
            [language, lesson_set] => Ok(Route::Quiz {
                language: language.to_string(),
                lesson_set: lesson_set.to_string(),
            }),
            _ => Err(RouteError::TooManySegments(s.to_string())),
        }
    }
}

/// A path segment must name a single entry: no dots-only names, no
/// separators, no whitespace or control characters.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_three_views() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Languages);
        assert_eq!("".parse::<Route>().unwrap(), Route::Languages);
        assert_eq!(
            "/es".parse::<Route>().unwrap(),
            Route::LessonSets {
                language: "es".into()
            }
        );
        assert_eq!(
            "/es/basics/".parse::<Route>().unwrap(),
            Route::Quiz {
                language: "es".into(),
                lesson_set: "basics".into()
            }
        );
    }

    #[test]
    fn display_round_trips() {
        for path in ["/", "/fr", "/fr/food-1"] {
            assert_eq!(path.parse::<Route>().unwrap().to_string(), path);
        }
    }

    #[test]
    fn rejects_bad_paths() {
        assert!(matches!(
            "/es//basics".parse::<Route>(),
            Err(RouteError::EmptySegment(_))
        ));
        assert!(matches!(
            "/es/basics/extra".parse::<Route>(),
            Err(RouteError::TooManySegments(_))
        ));
        assert!(matches!(
            "/../secrets".parse::<Route>(),
            Err(RouteError::InvalidSegment(_))
        ));
        assert!(matches!(
            "/es/my set".parse::<Route>(),
            Err(RouteError::InvalidSegment(_))
        ));
    }

    #[test]
    fn parent_routes() {
        let quiz: Route = "/es/basics".parse().unwrap();
        assert_eq!(quiz.parent().to_string(), "/es");
        assert_eq!(quiz.parent().parent(), Route::Languages);
        assert_eq!(Route::Languages.parent(), Route::Languages);
    }
}
