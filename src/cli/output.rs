//! Terminal formatting for daemon payloads

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Print a payload as pretty JSON
pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a table, or `empty_message` when there are no rows
pub fn print_table(header: &str, rows: &[String], empty_message: &str) {
    if rows.is_empty() {
        println!("{}", empty_message);
        return;
    }
    println!("{}", header);
    for row in rows {
        println!("{}", row);
    }
}

/// Elements of a JSON array; anything else has none
pub fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// First 12 characters of an ID, without any `sha256:` prefix
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    id.get(..12).unwrap_or(id)
}

/// Truncates a string to the specified length.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a size in bytes as a human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2}GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2}MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2}KB", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a timestamp as a human-readable "time ago" string
pub fn format_time_ago(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(time);

    if duration.num_days() > 365 {
        format!("{} years ago", duration.num_days() / 365)
    } else if duration.num_days() > 30 {
        format!("{} months ago", duration.num_days() / 30)
    } else if duration.num_days() > 7 {
        format!("{} weeks ago", duration.num_days() / 7)
    } else if duration.num_days() > 0 {
        format!("{} days ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{} hours ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{} minutes ago", duration.num_minutes())
    } else {
        "Less than a minute ago".to_string()
    }
}

/// Header for `containers list`
pub fn container_header() -> String {
    format!(
        "{:<15} {:<25} {:<30} {:<10} {}",
        "CONTAINER ID", "NAME", "IMAGE", "STATE", "STATUS"
    )
}

/// One `containers list` row
pub fn container_row(container: &Value) -> String {
    let name = container
        .get("Names")
        .and_then(|names| names.get(0))
        .and_then(Value::as_str)
        .map(|name| name.trim_start_matches('/'))
        .unwrap_or("");

    format!(
        "{:<15} {:<25} {:<30} {:<10} {}",
        short_id(text(container, "Id")),
        truncate(name, 25),
        truncate(text(container, "Image"), 30),
        text(container, "State"),
        text(container, "Status"),
    )
}

/// Header for `images list`
pub fn image_header() -> String {
    format!(
        "{:<15} {:<40} {:<20} {}",
        "IMAGE ID", "REPOSITORY:TAG", "CREATED", "SIZE"
    )
}

/// One `images list` row
pub fn image_row(image: &Value, now: DateTime<Utc>) -> String {
    let tag = image
        .get("RepoTags")
        .and_then(|tags| tags.get(0))
        .and_then(Value::as_str)
        .unwrap_or("<none>");
    let created = image
        .get("Created")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| format_time_ago(time, now))
        .unwrap_or_default();
    let size = image.get("Size").and_then(Value::as_u64).unwrap_or(0);

    format!(
        "{:<15} {:<40} {:<20} {}",
        short_id(text(image, "Id")),
        truncate(tag, 40),
        created,
        format_size(size),
    )
}

/// Header for `networks list`
pub fn network_header() -> String {
    format!(
        "{:<15} {:<25} {:<10} {}",
        "NETWORK ID", "NAME", "DRIVER", "SCOPE"
    )
}

/// One `networks list` row
pub fn network_row(network: &Value) -> String {
    format!(
        "{:<15} {:<25} {:<10} {}",
        short_id(text(network, "Id")),
        truncate(text(network, "Name"), 25),
        text(network, "Driver"),
        text(network, "Scope"),
    )
}

/// Header for `volumes list`
pub fn volume_header() -> String {
    format!("{:<10} {:<30} {}", "DRIVER", "VOLUME NAME", "MOUNTPOINT")
}

/// One `volumes list` row
pub fn volume_row(volume: &Value) -> String {
    format!(
        "{:<10} {:<30} {}",
        text(volume, "Driver"),
        text(volume, "Name"),
        text(volume, "Mountpoint"),
    )
}

/// Lines describing the result of removing an image
pub fn image_removal_lines(response: &Value) -> Vec<String> {
    items(response)
        .iter()
        .filter_map(|entry| {
            if let Some(tag) = entry.get("Untagged").and_then(Value::as_str) {
                Some(format!("Untagged: {}", tag))
            } else {
                entry
                    .get("Deleted")
                    .and_then(Value::as_str)
                    .map(|id| format!("Deleted: {}", id))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abc123def456789"), "abc123def456");
        assert_eq!(short_id("short"), "short");
        assert_eq!(
            short_id("sha256:0123456789abcdef0123456789abcdef"),
            "0123456789ab"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello world", 20), "hello world");
        assert_eq!(truncate("hello world this is long", 15), "hello world ...");
        assert_eq!(truncate("", 10), "");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.00KB");
        assert_eq!(format_size(7_340_032), "7.00MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00GB");
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now, now), "Less than a minute ago");
        assert_eq!(format_time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_time_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(format_time_ago(now - Duration::days(400), now), "1 years ago");
    }

    #[test]
    fn test_container_row() {
        let container = json!({
            "Id": "8dfafdbc3a40b7e2f1c4d5a6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f80912",
            "Names": ["/web"],
            "Image": "nginx:alpine",
            "State": "running",
            "Status": "Up 2 hours"
        });

        let row = container_row(&container);
        assert!(row.starts_with("8dfafdbc3a40 "));
        assert!(row.contains(" web "));
        assert!(row.contains("nginx:alpine"));
        assert!(row.ends_with("running    Up 2 hours"));
    }

    #[test]
    fn test_container_row_missing_fields() {
        let row = container_row(&json!({ "Id": "abc" }));
        assert!(row.starts_with("abc"));
    }

    #[test]
    fn test_image_row() {
        let now = Utc::now();
        let image = json!({
            "Id": "sha256:a6bd71f48f6839d9faae1f29d3babef831e76bc213107682c5cc80f0cbb30866",
            "RepoTags": ["alpine:3.19"],
            "Created": (now - Duration::days(3)).timestamp(),
            "Size": 7_340_032
        });

        let row = image_row(&image, now);
        assert!(row.starts_with("a6bd71f48f68 "));
        assert!(row.contains("alpine:3.19"));
        assert!(row.contains("3 days ago"));
        assert!(row.ends_with("7.00MB"));
    }

    #[test]
    fn test_image_row_untagged() {
        let image = json!({ "Id": "sha256:ffff", "RepoTags": null, "Size": 0 });
        let row = image_row(&image, Utc::now());
        assert!(row.contains("<none>"));
    }

    #[test]
    fn test_network_and_volume_rows() {
        let network = json!({
            "Id": "7fca4eb8c647e57e9d46c32714271e0c3f8bf8d17d346629e2820547b2d90039",
            "Name": "bridge",
            "Driver": "bridge",
            "Scope": "local"
        });
        assert_eq!(
            network_row(&network),
            format!("{:<15} {:<25} {:<10} {}", "7fca4eb8c647", "bridge", "bridge", "local")
        );

        let volume = json!({
            "Name": "pgdata",
            "Driver": "local",
            "Mountpoint": "/var/lib/docker/volumes/pgdata/_data"
        });
        assert_eq!(
            volume_row(&volume),
            format!(
                "{:<10} {:<30} {}",
                "local", "pgdata", "/var/lib/docker/volumes/pgdata/_data"
            )
        );
    }

    #[test]
    fn test_image_removal_lines() {
        let response = json!([
            { "Untagged": "alpine:3.19" },
            { "Deleted": "sha256:a6bd71f48f68" }
        ]);
        assert_eq!(
            image_removal_lines(&response),
            vec!["Untagged: alpine:3.19", "Deleted: sha256:a6bd71f48f68"]
        );
        assert!(image_removal_lines(&Value::Null).is_empty());
    }

    #[test]
    fn test_items() {
        assert_eq!(items(&json!([1, 2])).len(), 2);
        assert!(items(&json!({ "Volumes": null })).is_empty());
    }
}
