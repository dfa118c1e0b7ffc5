/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Operating system attribute parsing functions

use super::common::parse_sysfs_value;

/// Parse the zone name from /etc/timezone content
pub fn parse_timezone_file(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// Derive the zone name from the target of the /etc/localtime symlink
///
/// e.g. `/usr/share/zoneinfo/Europe/Paris` gives `Europe/Paris`.
pub fn timezone_from_localtime_target(target: &str) -> Option<String> {
    target
        .split_once("zoneinfo/")
        .map(|(_, zone)| zone.trim().to_string())
        .filter(|zone| !zone.is_empty())
}

/// Parse the output of `getprop <key>`
///
/// getprop prints an empty line for properties that are not set.
pub fn parse_getprop_output(stdout: &str) -> Option<String> {
    parse_sysfs_value(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone_file() {
        assert_eq!(parse_timezone_file("Europe/Paris\n"), Some("Europe/Paris".to_string()));
        assert_eq!(parse_timezone_file("# comment\n\nUTC\n"), Some("UTC".to_string()));
        assert_eq!(parse_timezone_file("\n"), None);
    }

    #[test]
    fn test_timezone_from_localtime_target() {
        assert_eq!(
            timezone_from_localtime_target("/usr/share/zoneinfo/America/New_York"),
            Some("America/New_York".to_string())
        );
        assert_eq!(timezone_from_localtime_target("/etc/localtime"), None);
        assert_eq!(timezone_from_localtime_target("/usr/share/zoneinfo/"), None);
    }

    #[test]
    fn test_parse_getprop_output() {
        assert_eq!(parse_getprop_output("R58M12ABCDE\n"), Some("R58M12ABCDE".to_string()));
        assert_eq!(parse_getprop_output("\n"), None);
    }
}
