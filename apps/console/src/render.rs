//! Plain-text and JSON rendering of controller state.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use shared::domain::{Direction, Job, MenuItem, Processor, Stream, Topic};

pub fn json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// `jobs` carries each job's index in the full catalogue, which is what
/// `select <index>` resolves against.
pub fn job_list(
    out: &mut impl Write,
    jobs: &[(usize, &Job)],
    selected: Option<&Job>,
) -> Result<()> {
    if jobs.is_empty() {
        writeln!(out, "no jobs")?;
        return Ok(());
    }
    for &(index, job) in jobs {
        let marker = if selected == Some(job) { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {index:>3}  {}  ({} streams)",
            job.name,
            job.streams.len()
        )?;
    }
    Ok(())
}

pub fn job_detail(out: &mut impl Write, job: &Job, selected: Option<&Stream>) -> Result<()> {
    writeln!(out, "job {}", job.name)?;
    if job.streams.is_empty() {
        writeln!(out, "  (no streams)")?;
    }
    for stream in &job.streams {
        let marker = if selected == Some(stream) { '*' } else { '-' };
        writeln!(out, "  {marker} {} ({})", stream.name, stream.component)?;
        for entry in &stream.config {
            writeln!(out, "      {} = {}", entry.key, entry.value)?;
        }
        for processor in &stream.processors {
            writeln!(out, "      -> {} [{}]", processor.name, processor.component)?;
        }
    }
    Ok(())
}

pub fn topics(out: &mut impl Write, topics: &[Topic]) -> Result<()> {
    if topics.is_empty() {
        writeln!(out, "no topics")?;
    }
    for topic in topics {
        writeln!(
            out,
            "{}  partitions={} replication={}",
            topic.name, topic.partitions, topic.replication_factor
        )?;
    }
    Ok(())
}

pub fn processors(out: &mut impl Write, processors: &[Processor]) -> Result<()> {
    if processors.is_empty() {
        writeln!(out, "no processors")?;
    }
    for processor in processors {
        match &processor.description {
            Some(description) => {
                writeln!(out, "{} [{}]  {description}", processor.name, processor.component)?
            }
            None => writeln!(out, "{} [{}]", processor.name, processor.component)?,
        }
    }
    Ok(())
}

pub fn menu(out: &mut impl Write, items: &[MenuItem]) -> Result<()> {
    for item in items {
        let side = match item.direction {
            Direction::Left => "left",
            Direction::Right => "right",
        };
        writeln!(out, "{:<8} {:<6} icon={}", item.name, side, item.icon)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared::domain::{ConfigEntry, ProcessorRef};

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn job_list_marks_selected_job() {
        let jobs = vec![
            Job {
                name: "a".into(),
                streams: Vec::new(),
            },
            Job::new_template(),
        ];
        let refs: Vec<(usize, &Job)> = jobs.iter().enumerate().collect();
        let text = rendered(|out| job_list(out, &refs, Some(&jobs[1])));

        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("    0  a"), "{text}");
        assert!(lines[1].starts_with("*   1  newJobTemplate"), "{text}");
    }

    #[test]
    fn job_list_prints_catalogue_index_not_row_number() {
        let job = Job::new_template();
        let text = rendered(|out| job_list(out, &[(4, &job)], None));
        assert!(text.starts_with("    4  newJobTemplate"), "{text}");
    }

    #[test]
    fn empty_job_list_says_so() {
        assert_eq!(rendered(|out| job_list(out, &[], None)), "no jobs\n");
    }

    #[test]
    fn job_detail_lists_config_and_processors() {
        let job = Job {
            name: "parse".into(),
            streams: vec![Stream {
                name: "raw".into(),
                component: "KafkaRecordStreamParallelProcessing".into(),
                config: vec![ConfigEntry::new("kafka.input.topics", "logisland_raw")],
                processors: vec![ProcessorRef {
                    name: "split".into(),
                    component: "SplitText".into(),
                }],
            }],
        };
        let text = rendered(|out| job_detail(out, &job, job.streams.first()));

        assert!(text.contains("* raw (KafkaRecordStreamParallelProcessing)"), "{text}");
        assert!(text.contains("kafka.input.topics = logisland_raw"), "{text}");
        assert!(text.contains("-> split [SplitText]"), "{text}");
    }

    #[test]
    fn menu_renders_direction_and_icon() {
        let text = rendered(|out| menu(out, &MenuItem::defaults()));
        assert!(text.starts_with("Start    right  icon=play"), "{text}");
    }
}
