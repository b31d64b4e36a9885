#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    WorkInProgress,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::WorkInProgress => "Work in progress",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceCard {
    pub title: &'static str,
    pub availability: Availability,
}

pub const SERVICES: [ServiceCard; 3] = [
    ServiceCard {
        title: "SMS",
        availability: Availability::Available,
    },
    ServiceCard {
        title: "Email",
        availability: Availability::WorkInProgress,
    },
    ServiceCard {
        title: "WhatsApp",
        availability: Availability::WorkInProgress,
    },
];
