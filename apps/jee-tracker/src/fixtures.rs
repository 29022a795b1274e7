//! Built-in preparation dataset loaded at startup.

use crate::models::{
    Achievement, Badge, CalendarEvent, Challenge, Competitor, Difficulty, EventType, ExamDates,
    ExamType, Flashcard, Goal, GoalCategory, MockTest, Priority, Quote, Subject, SubjectScore,
    SubjectSyllabus, Syllabus, TimeSlot, TimetableTask, Topic, TopicStatus, UserStats,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use TopicStatus::{InProgress, Mastered, NotStarted, ReviseSoon, Weak};

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub syllabus: Syllabus,
    pub tests: Vec<MockTest>,
    pub timetable: Vec<TimetableTask>,
    pub flashcards: Vec<Flashcard>,
    pub goals: Vec<Goal>,
    pub events: Vec<CalendarEvent>,
    pub user: UserStats,
    /// Badges beyond the ones listed on the user record.
    pub extra_badges: Vec<Badge>,
    pub achievements: Vec<Achievement>,
    pub challenges: Vec<Challenge>,
    /// Other learners on the leaderboard.
    pub rivals: Vec<Competitor>,
    pub quotes: Vec<Quote>,
    pub exam_dates: ExamDates,
}

impl Dataset {
    /// The sample preparation record shipped with the app.
    pub fn sample() -> Self {
        Self {
            syllabus: sample_syllabus(),
            tests: sample_tests(),
            timetable: sample_timetable(),
            flashcards: sample_flashcards(),
            goals: sample_goals(),
            events: sample_events(),
            user: sample_user(),
            extra_badges: sample_extra_badges(),
            achievements: sample_achievements(),
            challenges: sample_challenges(),
            rivals: sample_rivals(),
            quotes: sample_quotes(),
            exam_dates: ExamDates {
                mains_session1: ymd(2024, 1, 24),
                mains_session2: ymd(2024, 4, 4),
                advanced: ymd(2024, 5, 26),
            },
        }
    }

    /// User badges followed by the extended badge set.
    pub fn all_badges(&self) -> impl Iterator<Item = &Badge> {
        self.user.badges.iter().chain(self.extra_badges.iter())
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture date is valid")
}

fn slot(start_hour: u32, end_hour: u32) -> TimeSlot {
    TimeSlot {
        start: NaiveTime::from_hms_opt(start_hour, 0, 0).expect("fixture hour is valid"),
        end: NaiveTime::from_hms_opt(end_hour, 0, 0).expect("fixture hour is valid"),
    }
}

fn subject(subject: Subject, topics: Vec<Topic>) -> SubjectSyllabus {
    SubjectSyllabus { subject, topics }
}

fn sample_syllabus() -> Syllabus {
    Syllabus {
        mains: vec![
            subject(
                Subject::Physics,
                vec![
                    Topic::new("phy1", "Mechanics", &["Kinematics", "Dynamics", "Rotational Motion"], Mastered, true),
                    Topic::new("phy2", "Thermodynamics", &["Laws of Thermodynamics", "Heat Engines", "Kinetic Theory"], Weak, true),
                    Topic::new("phy3", "Waves & Oscillations", &["SHM", "Wave Motion", "Sound Waves"], ReviseSoon, false),
                    Topic::new("phy4", "Electromagnetism", &["Electrostatics", "Current Electricity", "Magnetic Effects"], InProgress, true),
                    Topic::new("phy5", "Optics", &["Ray Optics", "Wave Optics", "Optical Instruments"], NotStarted, false),
                ],
            ),
            subject(
                Subject::Chemistry,
                vec![
                    Topic::new("chem1", "Organic Chemistry", &["Hydrocarbons", "Functional Groups", "Biomolecules"], Mastered, true),
                    Topic::new("chem2", "Inorganic Chemistry", &["Periodic Table", "Chemical Bonding", "Coordination Compounds"], InProgress, true),
                    Topic::new("chem3", "Physical Chemistry", &["Chemical Kinetics", "Electrochemistry", "Solutions"], Weak, true),
                    Topic::new("chem4", "Environmental Chemistry", &["Pollution", "Green Chemistry"], NotStarted, false),
                ],
            ),
            subject(
                Subject::Mathematics,
                vec![
                    Topic::new("math1", "Calculus", &["Limits", "Derivatives", "Integrals", "Differential Equations"], Mastered, true),
                    Topic::new("math2", "Coordinate Geometry", &["Straight Lines", "Circles", "Parabola", "Hyperbola"], InProgress, true),
                    Topic::new("math3", "Algebra", &["Quadratic Equations", "Sequences & Series", "Permutations"], ReviseSoon, true),
                    Topic::new("math4", "Trigonometry", &["Ratios", "Identities", "Inverse Functions"], Weak, false),
                    Topic::new("math5", "Vector & 3D Geometry", &["Vectors", "Planes", "Lines in 3D"], NotStarted, false),
                ],
            ),
        ],
        advanced: vec![
            subject(
                Subject::Physics,
                vec![
                    Topic::new("adv-phy1", "Modern Physics", &["Quantum Mechanics", "Nuclear Physics", "Semiconductor"], InProgress, true),
                    Topic::new("adv-phy2", "Advanced Mechanics", &["Rigid Body Dynamics", "Fluid Mechanics"], NotStarted, true),
                ],
            ),
            subject(
                Subject::Chemistry,
                vec![
                    Topic::new("adv-chem1", "Advanced Organic", &["Reaction Mechanisms", "Stereochemistry"], Weak, true),
                    Topic::new("adv-chem2", "Advanced Inorganic", &["Transition Elements", "Organometallics"], NotStarted, false),
                ],
            ),
            subject(
                Subject::Mathematics,
                vec![
                    Topic::new("adv-math1", "Advanced Calculus", &["Multiple Integrals", "Vector Calculus"], InProgress, true),
                    Topic::new("adv-math2", "Complex Numbers", &["De Moivre's Theorem", "Applications"], ReviseSoon, false),
                ],
            ),
        ],
    }
}

fn score(score: u32, total: u32, accuracy: f64) -> SubjectScore {
    SubjectScore { score, total, accuracy }
}

fn sample_tests() -> Vec<MockTest> {
    vec![
        MockTest {
            id: "test1".into(),
            exam: ExamType::Mains,
            date: ymd(2024, 12, 15),
            score: 245,
            total_marks: 300,
            accuracy: 81.7,
            time_spent: 180,
            physics: score(85, 100, 85.0),
            chemistry: score(78, 100, 78.0),
            mathematics: score(82, 100, 82.0),
            weak_topics: vec![
                "Thermodynamics".into(),
                "Physical Chemistry".into(),
                "Trigonometry".into(),
            ],
        },
        MockTest {
            id: "test2".into(),
            exam: ExamType::Advanced,
            date: ymd(2024, 12, 10),
            score: 198,
            total_marks: 372,
            accuracy: 53.2,
            time_spent: 180,
            physics: score(72, 124, 58.0),
            chemistry: score(65, 124, 52.0),
            mathematics: score(61, 124, 49.0),
            weak_topics: vec![
                "Modern Physics".into(),
                "Advanced Organic".into(),
                "Complex Numbers".into(),
            ],
        },
    ]
}

fn task(id: &str, day: Weekday, time: TimeSlot, subject: Subject, topic: &str, completed: bool) -> TimetableTask {
    TimetableTask {
        id: id.into(),
        day,
        slot: time,
        subject,
        topic: topic.into(),
        completed,
    }
}

fn sample_timetable() -> Vec<TimetableTask> {
    vec![
        task("tt1", Weekday::Mon, slot(6, 8), Subject::Physics, "Mechanics Revision", true),
        task("tt2", Weekday::Mon, slot(9, 11), Subject::Mathematics, "Calculus Practice", true),
        task("tt3", Weekday::Mon, slot(15, 17), Subject::Chemistry, "Organic Chemistry", false),
        task("tt4", Weekday::Tue, slot(6, 8), Subject::Mathematics, "Coordinate Geometry", false),
        task("tt5", Weekday::Tue, slot(9, 11), Subject::Physics, "Thermodynamics", false),
        task("tt6", Weekday::Tue, slot(15, 17), Subject::Chemistry, "Physical Chemistry", false),
    ]
}

fn sample_flashcards() -> Vec<Flashcard> {
    vec![
        Flashcard {
            id: "fc1".into(),
            subject: Subject::Physics,
            topic: "Mechanics".into(),
            question: "What is Newton's Second Law of Motion?".into(),
            answer: "F = ma (Force equals mass times acceleration)".into(),
            difficulty: Difficulty::Medium,
            last_reviewed: ymd(2024, 12, 14),
            next_review: ymd(2024, 12, 17),
        },
        Flashcard {
            id: "fc2".into(),
            subject: Subject::Chemistry,
            topic: "Organic Chemistry".into(),
            question: "What is the IUPAC name of CH\u{2083}CH\u{2082}OH?".into(),
            answer: "Ethanol".into(),
            difficulty: Difficulty::Easy,
            last_reviewed: ymd(2024, 12, 13),
            next_review: ymd(2024, 12, 16),
        },
        Flashcard {
            id: "fc3".into(),
            subject: Subject::Mathematics,
            topic: "Calculus".into(),
            question: "What is the derivative of sin(x)?".into(),
            answer: "cos(x)".into(),
            difficulty: Difficulty::Easy,
            last_reviewed: ymd(2024, 12, 15),
            next_review: ymd(2024, 12, 18),
        },
    ]
}

fn sample_goals() -> Vec<Goal> {
    vec![
        Goal {
            id: "goal1".into(),
            title: "Complete Physics Syllabus".into(),
            description: "Finish all physics topics for JEE Mains".into(),
            deadline: ymd(2024, 12, 31),
            progress: 65,
            priority: Priority::High,
            category: GoalCategory::Syllabus,
            completed: false,
        },
        Goal {
            id: "goal2".into(),
            title: "Mock Test Average 250+".into(),
            description: "Maintain average score above 250 in JEE Mains mocks".into(),
            deadline: ymd(2024, 12, 30),
            progress: 80,
            priority: Priority::High,
            category: GoalCategory::Performance,
            completed: false,
        },
        Goal {
            id: "goal3".into(),
            title: "Daily 6 Hour Study".into(),
            description: "Maintain 6+ hours daily study routine".into(),
            deadline: ymd(2024, 12, 25),
            progress: 45,
            priority: Priority::Medium,
            category: GoalCategory::Routine,
            completed: false,
        },
    ]
}

fn event(date: NaiveDate, title: &str, kind: EventType, priority: Priority) -> CalendarEvent {
    CalendarEvent {
        date,
        title: title.into(),
        kind,
        priority,
    }
}

fn sample_events() -> Vec<CalendarEvent> {
    vec![
        event(ymd(2024, 12, 20), "Physics Mock Test", EventType::Test, Priority::High),
        event(ymd(2024, 12, 22), "Complete Calculus Chapter", EventType::Study, Priority::Medium),
        event(ymd(2024, 12, 25), "Chemistry Revision", EventType::Revision, Priority::Medium),
        event(ymd(2024, 12, 28), "JEE Mains Practice", EventType::Practice, Priority::High),
        event(ymd(2024, 12, 31), "Year-end Assessment", EventType::Milestone, Priority::High),
    ]
}

fn badge(id: &str, name: &str, description: &str, earned_date: Option<NaiveDate>) -> Badge {
    Badge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        earned: earned_date.is_some(),
        earned_date,
    }
}

fn sample_user() -> UserStats {
    UserStats {
        total_xp: 2450,
        current_streak: 15,
        longest_streak: 28,
        total_study_hours: 245,
        completed_topics: 12,
        total_topics: 35,
        badges: vec![
            badge("badge1", "Early Bird", "7 days of 6 AM study", Some(ymd(2024, 12, 10))),
            badge("badge2", "Physics Master", "Complete 10 physics topics", Some(ymd(2024, 12, 8))),
            badge("badge3", "Streak Master", "15 day study streak", Some(ymd(2024, 12, 15))),
            badge("badge4", "Mock Test Champion", "Score 80%+ in 5 mock tests", None),
        ],
    }
}

fn sample_extra_badges() -> Vec<Badge> {
    vec![
        badge("badge5", "Speed Demon", "Complete 5 topics in one day", None),
        badge("badge6", "Night Owl", "Study after 11 PM for 7 days", None),
        badge("badge7", "Perfectionist", "Score 100% in 3 mock tests", None),
        badge("badge8", "Consistency King", "30 day study streak", None),
    ]
}

fn achievement(id: &str, title: &str, description: &str, progress: u8, current: u32, max: u32, reward: &str) -> Achievement {
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        progress,
        current_value: current,
        max_value: max,
        reward: reward.into(),
    }
}

fn sample_achievements() -> Vec<Achievement> {
    vec![
        achievement("ach1", "Study Warrior", "Complete 100 hours of study", 75, 75, 100, "50 XP"),
        achievement("ach2", "Mock Master", "Take 50 mock tests", 40, 20, 50, "100 XP + Badge"),
        achievement("ach3", "Topic Champion", "Master 25 topics", 48, 12, 25, "75 XP"),
        achievement("ach4", "Streak Legend", "Maintain 50 day streak", 30, 15, 50, "200 XP + Special Badge"),
    ]
}

fn challenge(id: &str, title: &str, description: &str, progress: u8, reward: &str, time_left: &str) -> Challenge {
    Challenge {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        progress,
        reward: reward.into(),
        time_left: time_left.into(),
    }
}

fn sample_challenges() -> Vec<Challenge> {
    vec![
        challenge("ch1", "Speed Study", "Complete 10 flashcard reviews in under 5 minutes", 60, "50 XP", "2 days"),
        challenge("ch2", "Perfect Score", "Score 90%+ in any mock test", 0, "100 XP + Badge", "5 days"),
        challenge("ch3", "Daily Dedication", "Study for 3+ hours every day this week", 86, "75 XP", "1 day"),
    ]
}

fn sample_rivals() -> Vec<Competitor> {
    [
        ("Alex Kumar", 3200),
        ("Priya Singh", 2800),
        ("Rahul Sharma", 2200),
        ("Anita Gupta", 2100),
    ]
    .into_iter()
    .map(|(name, xp)| Competitor { name: name.into(), xp })
    .collect()
}

fn sample_quotes() -> Vec<Quote> {
    [
        (
            "Success is the sum of small efforts repeated day in and day out.",
            "Break complex topics into smaller, manageable chunks for better retention.",
        ),
        (
            "The expert in anything was once a beginner.",
            "Focus on understanding concepts rather than memorizing formulas.",
        ),
        (
            "Your limitation\u{2014}it's only your imagination.",
            "Practice previous year questions to understand exam patterns.",
        ),
    ]
    .into_iter()
    .map(|(quote, tip)| Quote { quote: quote.into(), tip: tip.into() })
    .collect()
}
