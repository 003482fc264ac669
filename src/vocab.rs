//! Static vocabulary tables used by the classifier and the keyword formatter.
//!
//! The lists are plain data so they can be maintained without touching the
//! classification or formatting algorithms. Bump [`VOCABULARY_VERSION`]
//! whenever an entry is added or removed; it is recorded in the `Creator`
//! entry of exported document metadata.

/// Version of the vocabulary tables below.
pub const VOCABULARY_VERSION: &str = "2024.1";

/// Canonical resume section names (lowercase).
///
/// Multi-word entries are matched before their single-word suffixes.
pub const SECTION_HEADERS: &[&str] = &[
    "professional summary",
    "executive summary",
    "career summary",
    "work experience",
    "professional experience",
    "employment history",
    "volunteer experience",
    "technical skills",
    "core competencies",
    "career objective",
    "contact information",
    "contact",
    "summary",
    "experience",
    "employment",
    "education",
    "skills",
    "competencies",
    "certifications",
    "certificates",
    "projects",
    "achievements",
    "accomplishments",
    "awards",
    "publications",
    "objective",
    "profile",
    "interests",
    "references",
];

/// Labels that mark a line as contact details (matched case-insensitively, whole word).
pub const CONTACT_LABELS: &[&str] = &[
    "phone", "email", "e-mail", "linkedin", "github", "tel", "mobile",
];

/// Labels that open a skills line when followed by a colon.
pub const SKILL_LABELS: &[&str] = &[
    "programming",
    "languages",
    "technologies",
    "tools",
    "frameworks",
    "databases",
];

/// Job-title words that turn the line after the name into a subtitle.
pub const JOB_TITLES: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "specialist",
    "coordinator",
    "director",
    "consultant",
];

/// Glyphs recognised as bullet markers at the start of a line.
pub const BULLET_GLYPHS: &[char] = &['•', '·', '●', '◦', '○', '⚬', '▪', '■', '-', '*'];

/// Technical vocabulary highlighted as `tech` in screen previews.
pub const TECH_TERMS: &[&str] = &[
    // Languages
    "Rust", "Python", "Java", "JavaScript", "TypeScript", "Golang", "C++", "C#",
    "Ruby", "PHP", "Swift", "Kotlin", "Scala", "SQL", "HTML", "CSS", "Bash",
    // Frameworks and runtimes
    "React", "Angular", "Vue", "Node.js", "Next.js", "Django", "Flask", "FastAPI",
    "Spring Boot", "Ruby on Rails", ".NET", "Tokio", "GraphQL", "RESTful",
    // Data
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Kafka", "Elasticsearch", "Spark", "Hadoop",
    "Snowflake", "DynamoDB", "SQLite",
    // Cloud and infrastructure
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
    "Linux", "Git", "CI/CD", "Microservices", "Serverless",
    // ML and analytics
    "TensorFlow", "PyTorch", "Pandas", "NumPy", "Machine Learning", "Deep Learning", "NLP",
    "Tableau",
    // Practices
    "Agile", "Scrum", "DevOps", "API", "APIs",
];

/// Professional action verbs highlighted as `keyword` in screen previews.
pub const ACTION_VERBS: &[&str] = &[
    "achieved", "architected", "automated", "built", "collaborated", "created", "delivered",
    "designed", "developed", "drove", "enhanced", "established", "implemented", "improved",
    "increased", "launched", "led", "managed", "mentored", "migrated", "optimized",
    "orchestrated", "owned", "reduced", "refactored", "scaled", "shipped", "spearheaded",
    "streamlined", "transformed",
];

/// Salutations that open a cover letter.
pub const LETTER_OPENINGS: &[&str] = &["dear ", "to whom it may concern"];

/// Closings that end a cover letter.
pub const LETTER_CLOSINGS: &[&str] = &[
    "sincerely",
    "best regards",
    "kind regards",
    "warm regards",
    "yours truly",
    "yours faithfully",
    "respectfully",
];
