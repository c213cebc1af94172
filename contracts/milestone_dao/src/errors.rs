use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum DaoError {
    NotInitialized = 0,
    AlreadyInitialized = 1,
    Unauthorized = 2,
    ContractPaused = 3,
    InvalidParameter = 4,
    Overflow = 5,

    // Registry
    ProposalNotFound = 10,
    InsufficientStake = 11,
    InsufficientReputation = 12,
    MalformedMilestones = 13,
    NotActive = 14,
    NotApproved = 15,
    InvalidMilestone = 16,
    NotCurrentMilestone = 17,
    MilestoneAlreadyCompleted = 18,

    // Governance
    VotingAlreadyOpen = 20,
    VotingNotOpen = 21,
    VotingClosed = 22,
    AlreadyVoted = 23,
    NoVotingPower = 24,
    VotingInProgress = 25,
    ProposalDidNotPass = 26,
    ProposalPassed = 27,

    // Treasury
    InvalidAmount = 30,
    InvalidRecipient = 31,
    AlreadyReleased = 32,
    InsufficientTreasuryBalance = 33,
    TimelockNotFound = 34,
    AlreadyExecuted = 35,
    TransferCancelled = 36,
    TimelockNotReady = 37,
    NotRecipient = 38,
}
