//! Diesel schema for team and user persistence.

diesel::table! {
    /// Users known to the directory.
    users (id) {
        /// Externally assigned user identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Display name.
        #[max_length = 255]
        username -> Varchar,
        /// Whether the user may be chosen as a reviewer.
        is_active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teams keyed by their unique name.
    teams (name) {
        /// Unique team name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership; a user appears at most once.
    team_members (user_id) {
        /// Member user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Owning team name.
        #[max_length = 255]
        team_name -> Varchar,
        /// Listing order within the team.
        position -> Int4,
    }
}
