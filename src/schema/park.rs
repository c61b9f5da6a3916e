//! The National Park satisfaction and behavior survey.

use super::*;
use crate::errors::SchemaError;

const TRIP_REASONS: &[&str] = &[
    "Sightseeing",
    "Hiking",
    "Camping",
    "Wildlife viewing",
    "Photography",
    "Visiting friends or family nearby",
    "Passing through",
    "Attending an event",
    "Education or research",
    "Work or business",
    "Rest and relaxation",
];

const MOTIVATIONS: &[&str] = &[
    "Enjoy the scenery",
    "View wildlife",
    "Get exercise",
    "Spend time with family",
    "Spend time with friends",
    "Learn about nature",
    "Learn about history",
    "Experience solitude",
    "Relieve stress",
    "Take photographs",
    "Challenge myself physically",
    "Get away from the city",
    "Visit a bucket-list destination",
];

const LODGING: &[&str] = &[
    "Campground inside the park",
    "Lodge or hotel inside the park",
    "Backcountry camping",
    "Campground outside the park",
    "Hotel or motel outside the park",
    "Vacation rental",
    "Home of friends or family",
    "Other lodging",
];

const PARK_ATTRIBUTES: &[&str] = &[
    "Visitor center",
    "Park rangers and staff",
    "Trail conditions",
    "Trail signs",
    "Restrooms",
    "Campgrounds",
    "Picnic areas",
    "Parking",
    "Park roads",
    "Shuttle service",
    "Entrance station",
    "Park website",
    "Maps and brochures",
    "Exhibits",
    "Ranger programs",
    "Wildlife",
    "Scenic views",
    "Natural quiet",
    "Clean air",
    "Dark night skies",
    "Historic sites",
    "Food services",
    "Gift shops",
    "Lodging",
    "Accessibility",
    "Personal safety",
    "Cell phone coverage",
    "Level of crowding",
    "Value for the entrance fee",
];

const BEHAVIORS: &[&str] = &[
    "Stayed on designated trails",
    "Packed out all trash",
    "Kept a safe distance from wildlife",
    "Recycled",
    "Used the park shuttle",
    "Refilled reusable water bottles",
    "Read interpretive signs",
    "Followed fire regulations",
    "Kept noise to a minimum",
    "Left rocks, plants and artifacts in place",
    "Camped only in designated sites",
    "Kept pets on a leash",
    "Shared trails courteously",
];

const VALUED_ASPECTS: &[&str] = &[
    "Scenery",
    "Wildlife",
    "Solitude",
    "Outdoor recreation",
    "History",
    "Education",
    "Time with family and friends",
    "Physical challenge",
    "Photography",
    "Cultural heritage",
];

/// Build the full survey. Fails only if the definition below is inconsistent.
pub fn national_park_survey() -> Result<SurveySchema, SchemaError> {
    SurveySchema::builder()
        .single("q1", "Please indicate your age.", AGES)
        .single("q2", "What is your gender?", GENDER)
        .single("q3", "Are you Hispanic or Latino?", YES_NO)
        .multi(
            "q4",
            "Which of these categories best indicates your race?",
            RACE,
        )
        .help("Please select one or more.")
        .single(
            "q5",
            "What is the highest level of education you have completed?",
            EDUCATION,
        )
        .single("q6", "What is your annual household income?", INCOME)
        .text("q7", "What is your home ZIP code?", 10)
        .single("q8", "Is this your first visit to this National Park?", YES_NO)
        .text(
            "q9",
            "Including this trip, how many times have you visited this park?",
            50,
        )
        .integer("q10_1", "Number of adults (18 and over) in your group")
        .integer("q10_2", "Number of children (under 18) in your group")
        .single_matrix(
            "q11",
            "What is the primary purpose of your trip? Please select your top three \
             reasons that best describe the overall purpose of your trip.",
            TRIP_REASONS,
            TRIP_RANK,
        )
        .multi_with_other(
            "q12",
            "How did you learn about this park?",
            INFO_SOURCES,
            "q12_23_text",
        )
        .help("Please select all that apply.")
        .text("q12_23_text", "Other source", 255)
        .text("q13", "What did you enjoy most about your visit?", 2000)
        .text("q14", "What did you enjoy least about your visit?", 2000)
        .text("q15", "What could the park do to improve your visit?", 2000)
        .single(
            "q16",
            "Overall, how satisfied were you with your visit?",
            SATISFACTION,
        )
        .single_matrix(
            "q17",
            "How important was each of the following reasons for your visit?",
            MOTIVATIONS,
            IMPORTANCE,
        )
        .single_matrix(
            "q18",
            "How well were you able to achieve your motivations? \
             (If it is not applicable, please select not applicable)",
            MOTIVATIONS,
            ACHIEVEMENT,
        )
        .multi_with_other(
            "q19",
            "How did you travel to the park?",
            TRANSPORT,
            "q19_6_text",
        )
        .text("q19_6_text", "Other means of travel", 255)
        .multi_with_other(
            "q20",
            "Which activities did you take part in during your visit?",
            ACTIVITIES,
            "q20_10_text",
        )
        .text("q20_10_text", "Other activity", 255)
        .integer_matrix(
            "q21",
            "Where did you stay during your National Park visit and how many nights \
             for each?",
            LODGING,
        )
        .single_matrix(
            "q22_1",
            "Please indicate the level of importance of the following items for your \
             visit to this National Park.",
            PARK_ATTRIBUTES,
            IMPORTANCE,
        )
        .single_matrix(
            "q22_2",
            "Please indicate the quality of your experience with the following items \
             based on your visit.",
            PARK_ATTRIBUTES,
            QUALITY,
        )
        .single(
            "q23",
            "Would you recommend this park to friends or family?",
            RECOMMEND,
        )
        .single_matrix(
            "q24",
            "How frequently did you do the following during your National Park visit? \
             (If not applicable, please select not applicable)",
            BEHAVIORS,
            FREQUENCY,
        )
        .text(
            "q25",
            "Is there anything else you would like to tell us about your visit?",
            2000,
        )
        .single(
            "q26",
            "How likely are you to visit this park again?",
            LIKELIHOOD,
        )
        .single("q27", "Who did you travel with on this trip?", GROUP_TYPE)
        .integer_matrix(
            "q28",
            "Please rank the following National Park aspects from 1 to 10, with 1 being \
             the most valuable aspect to you and 10 being the least valuable aspect to you.",
            VALUED_ASPECTS,
        )
        .build()
}
