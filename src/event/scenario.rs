// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scenario data attached to the run events of behavior-driven tests.

use serde::{Deserialize, Serialize};

/// Feature a [`Scenario`] belongs to.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Feature {
    /// Name of this [`Feature`].
    pub name: String,

    /// Path of the feature file, relative to the run's root directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_filename: Option<String>,
}

/// Executed step of a [`Scenario`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Step {
    /// Keyword of this [`Step`] (`Given`, `When`, `Then`, `And`, `But`).
    pub keyword: String,

    /// Text of this [`Step`] following its keyword.
    pub name: String,

    /// Whether this [`Step`] failed.
    #[serde(default)]
    pub failed: bool,

    /// Line of this [`Step`] in its feature file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl Step {
    /// Creates a new [`Step`].
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        name: impl Into<String>,
        failed: bool,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            failed,
            line_number: None,
        }
    }
}

/// Behavior-driven test case: ordered [`Step`]s tied to a parent
/// [`Feature`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Scenario {
    /// Name of this [`Scenario`].
    pub name: String,

    /// [`Feature`] this [`Scenario`] belongs to.
    pub feature: Feature,

    /// [`Step`]s in their execution order.
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Line of this [`Scenario`] in its feature file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    /// Tags of this [`Scenario`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Scenario {
    /// Creates a new [`Scenario`] of the given `feature` with the given
    /// `steps`.
    #[must_use]
    pub fn new(
        feature: impl Into<String>,
        name: impl Into<String>,
        steps: impl IntoIterator<Item = Step>,
    ) -> Self {
        Self {
            name: name.into(),
            feature: Feature { name: feature.into(), rel_filename: None },
            steps: steps.into_iter().collect(),
            line_number: None,
            tags: Vec::new(),
        }
    }

    /// Returns the first [`Step`] that failed, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scenario_report() {
        let json = r#"{
            "name": "Login succeeds",
            "line_number": 3,
            "tags": ["auth"],
            "feature": {
                "name": "Login",
                "rel_filename": "features/login.feature"
            },
            "steps": [
                {"keyword": "Given", "name": "a user", "failed": false},
                {"keyword": "When", "name": "they log in", "failed": false},
                {
                    "keyword": "Then",
                    "name": "they see dashboard",
                    "failed": true,
                    "line_number": 6
                }
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.name, "Login succeeds");
        assert_eq!(scenario.feature.name, "Login");
        assert_eq!(scenario.tags, ["auth"]);
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[2].line_number, Some(6));
        assert_eq!(
            scenario.failed_step().map(|s| s.name.as_str()),
            Some("they see dashboard"),
        );
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{"name": "s", "feature": {"name": "f"}}"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario, Scenario::new("f", "s", Vec::new()));
        assert!(scenario.failed_step().is_none());
    }

    #[test]
    fn first_failed_step_wins() {
        let scenario = Scenario::new(
            "f",
            "s",
            [
                Step::new("Given", "one", false),
                Step::new("When", "two", true),
                Step::new("Then", "three", true),
            ],
        );

        assert_eq!(
            scenario.failed_step().map(|s| s.name.as_str()),
            Some("two"),
        );
    }
}
