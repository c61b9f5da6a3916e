//! Choice sets used by the National Park survey.

use super::Choice;

pub const AGES: &[Choice] = &[
    Choice::new("1", "18-24"),
    Choice::new("2", "25-34"),
    Choice::new("3", "35-44"),
    Choice::new("4", "45-54"),
    Choice::new("5", "55-64"),
    Choice::new("6", "65 or older"),
];

pub const GENDER: &[Choice] = &[
    Choice::new("M", "Male"),
    Choice::new("F", "Female"),
    Choice::new("N", "Non-binary / third gender"),
    Choice::new("P", "Prefer not to say"),
];

pub const YES_NO: &[Choice] = &[Choice::new("Y", "Yes"), Choice::new("N", "No")];

pub const RACE: &[Choice] = &[
    Choice::new("AA", "American Indian or Alaska Native"),
    Choice::new("A", "Asian"),
    Choice::new("B", "Black or African American"),
    Choice::new("N", "Native Hawaiian or Other Pacific Islander"),
    Choice::new("W", "White"),
    Choice::new("T", "Two or more races"),
];

pub const EDUCATION: &[Choice] = &[
    Choice::new("1", "Less than high school"),
    Choice::new("2", "Some high school"),
    Choice::new("3", "High school graduate or GED"),
    Choice::new("4", "Vocational/trade school certificate"),
    Choice::new("5", "Some college"),
    Choice::new("6", "Associate degree (AA, AS, etc.)"),
    Choice::new("7", "Bachelor's degree (BA, AB, BS, etc.)"),
    Choice::new("8", "Master's degree (MA, MS, MEd, MSW, MBA, etc.)"),
    Choice::new("9", "Professional degree (MG, DDS, DVM, LLB, JD, etc.)"),
    Choice::new("10", "Doctorate degree (PhD, EdD, etc.)"),
];

pub const INCOME: &[Choice] = &[
    Choice::new("1", "Less than $25,000"),
    Choice::new("2", "$25,000 - $49,999"),
    Choice::new("3", "$50,000 - $74,999"),
    Choice::new("4", "$75,000 - $99,999"),
    Choice::new("5", "$100,000 - $149,999"),
    Choice::new("6", "$150,000 or more"),
    Choice::new("7", "Prefer not to say"),
];

pub const TRIP_RANK: &[Choice] = &[
    Choice::new("1", "Primary reason"),
    Choice::new("2", "Second reason"),
    Choice::new("3", "Third reason"),
];

pub const INFO_SOURCES: &[Choice] = &[
    Choice::new("1", "Friends or family"),
    Choice::new("2", "National Park Service website"),
    Choice::new("3", "Social media"),
    Choice::new("4", "Travel guidebook"),
    Choice::new("5", "Travel agency or tour operator"),
    Choice::new("6", "Television or radio"),
    Choice::new("7", "Newspaper or magazine"),
    Choice::new("8", "Visitor center"),
    Choice::new("9", "Previous visit"),
];

pub const SATISFACTION: &[Choice] = &[
    Choice::new("1", "Very dissatisfied"),
    Choice::new("2", "Dissatisfied"),
    Choice::new("3", "Neither satisfied nor dissatisfied"),
    Choice::new("4", "Satisfied"),
    Choice::new("5", "Very satisfied"),
];

pub const IMPORTANCE: &[Choice] = &[
    Choice::new("1", "Not at all important"),
    Choice::new("2", "Slightly important"),
    Choice::new("3", "Moderately important"),
    Choice::new("4", "Very important"),
    Choice::new("5", "Extremely important"),
];

pub const ACHIEVEMENT: &[Choice] = &[
    Choice::new("1", "Not at all"),
    Choice::new("2", "Slightly"),
    Choice::new("3", "Moderately"),
    Choice::new("4", "Mostly"),
    Choice::new("5", "Completely"),
    Choice::new("NA", "Not applicable"),
];

pub const TRANSPORT: &[Choice] = &[
    Choice::new("1", "Private vehicle"),
    Choice::new("2", "Rental vehicle"),
    Choice::new("3", "RV or camper"),
    Choice::new("4", "Tour bus"),
    Choice::new("5", "Park shuttle"),
];

pub const ACTIVITIES: &[Choice] = &[
    Choice::new("1", "Hiking"),
    Choice::new("2", "Camping"),
    Choice::new("3", "Wildlife viewing"),
    Choice::new("4", "Photography"),
    Choice::new("5", "Scenic driving"),
    Choice::new("6", "Ranger-led programs"),
    Choice::new("7", "Fishing"),
    Choice::new("8", "Picnicking"),
    Choice::new("9", "Water activities"),
];

pub const QUALITY: &[Choice] = &[
    Choice::new("1", "Very poor"),
    Choice::new("2", "Poor"),
    Choice::new("3", "Fair"),
    Choice::new("4", "Good"),
    Choice::new("5", "Very good"),
    Choice::new("NA", "Not applicable"),
];

pub const RECOMMEND: &[Choice] = &[
    Choice::new("1", "Definitely would not"),
    Choice::new("2", "Probably would not"),
    Choice::new("3", "Not sure"),
    Choice::new("4", "Probably would"),
    Choice::new("5", "Definitely would"),
];

pub const FREQUENCY: &[Choice] = &[
    Choice::new("1", "Never"),
    Choice::new("2", "Rarely"),
    Choice::new("3", "Sometimes"),
    Choice::new("4", "Often"),
    Choice::new("5", "Always"),
    Choice::new("NA", "Not applicable"),
];

pub const LIKELIHOOD: &[Choice] = &[
    Choice::new("1", "Very unlikely"),
    Choice::new("2", "Unlikely"),
    Choice::new("3", "Neither likely nor unlikely"),
    Choice::new("4", "Likely"),
    Choice::new("5", "Very likely"),
];

pub const GROUP_TYPE: &[Choice] = &[
    Choice::new("1", "Alone"),
    Choice::new("2", "Family"),
    Choice::new("3", "Friends"),
    Choice::new("4", "Family and friends"),
    Choice::new("5", "Organized group"),
];
