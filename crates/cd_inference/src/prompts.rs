//! Instruction text sent to the vision model alongside every image.
//!
//! The key names requested here are the ones [`crate::shaping`] looks for.
//! Changing one side without the other silently drops fields.

pub const ANALYSIS_PROMPT: &str = r#"You are a careful multimodal vision assistant. Look at the attached image and reply with ONLY a JSON object: no markdown, no explanation before or after it.

Crowd fields:
 - people_count: integer, your best estimate of how many people are visible
 - crowd_score: integer from 1 (empty) to 10 (packed)
 - crowd_label: "Low", "Medium" or "High"
 - confidence: number from 0 to 100 describing how sure you are of the count
 - rationale: one or two sentences on how you reached the estimate

Departure board fields:
 - screen_detected: true if any screen, monitor or information board is visible, otherwise false
 - departure_type: one of "flight", "train", "bus", "subway", "ferry", or "none"
 - departure_info: array with one object per readable row of the board, each with
     * flight_number (or train_number / route_number): the service identifier
     * destination: destination city or station
     * departure_time: scheduled time as shown
     * status: e.g. "On Time", "Delayed", "Boarding"
     * gate (or platform): as shown
   Include only what you can actually read. Use an empty array when no board is visible.

Scene:
 - general_description: two or three sentences describing the scene

If unsure, lower the confidence and still give your best estimate."#;
