//! 基于发言间隔的简单说话人切分

use crate::clients::TranscriptSegment;
use crate::models::evaluation::entities::{ParticipationReport, SpeakerTime};
use crate::utils::round2;

/// 相邻片段间隔超过 `gap_secs` 视为换人发言
pub fn analyze_participation(
    segments: &[TranscriptSegment],
    total_duration: f64,
    gap_secs: f64,
) -> ParticipationReport {
    let mut groups: Vec<f64> = Vec::new();
    let mut current: Option<f64> = None;
    let mut last_end = 0.0;

    for segment in segments {
        if segment.start - last_end > gap_secs
            && let Some(time) = current.take()
        {
            groups.push(time);
        }
        let length = (segment.end - segment.start).max(0.0);
        *current.get_or_insert(0.0) += length;
        last_end = segment.end;
    }
    groups.extend(current);

    let speaker_times = groups
        .into_iter()
        .enumerate()
        .map(|(index, time)| SpeakerTime {
            speaker_id: index + 1,
            time: round2(time),
            percentage: if total_duration > 0.0 {
                round2(time / total_duration * 100.0)
            } else {
                0.0
            },
        })
        .collect::<Vec<_>>();

    ParticipationReport {
        total_duration,
        num_speakers_detected: speaker_times.len(),
        speaker_times,
    }
}
