/// One row of the fixed dataset written on first startup.
pub struct SeedActivity {
    pub name: &'static str,
    pub description: &'static str,
    pub schedule: &'static str,
    pub max_participants: u32,
    pub participants: &'static [&'static str],
}

pub const INITIAL_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    // sports
    SeedActivity {
        name: "Soccer Team",
        description: "Join the school soccer team and compete in local leagues",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 18,
        participants: &["lucas@mergington.edu", "mia@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball Club",
        description: "Practice basketball skills and play friendly matches",
        schedule: "Wednesdays, 3:30 PM - 5:00 PM",
        max_participants: 15,
        participants: &["liam@mergington.edu", "ava@mergington.edu"],
    },
    // arts
    SeedActivity {
        name: "Drama Club",
        description: "Participate in school plays and improve acting skills",
        schedule: "Mondays, 4:00 PM - 5:30 PM",
        max_participants: 20,
        participants: &["noah@mergington.edu", "isabella@mergington.edu"],
    },
    SeedActivity {
        name: "Art Workshop",
        description: "Explore painting, drawing, and other visual arts",
        schedule: "Fridays, 2:00 PM - 3:30 PM",
        max_participants: 16,
        participants: &["amelia@mergington.edu", "benjamin@mergington.edu"],
    },
    // academics
    SeedActivity {
        name: "Math Olympiad",
        description: "Prepare for math competitions and solve challenging problems",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 10,
        participants: &["charlotte@mergington.edu", "jack@mergington.edu"],
    },
    SeedActivity {
        name: "Debate Team",
        description: "Develop public speaking and argumentation skills",
        schedule: "Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 12,
        participants: &["harper@mergington.edu", "elijah@mergington.edu"],
    },
];
