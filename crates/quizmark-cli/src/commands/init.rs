//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.json");
    if example_path.exists() {
        println!("quizzes/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizmark.toml to match your syllabus");
    println!("  2. Run: quizmark validate --quiz quizzes/example.json");
    println!("  3. Run: quizmark grade --quiz quizzes/example.json --answers <answers.json>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

# Where graded attempts are saved. Overridden by QUIZMARK_OUTPUT_DIR.
output_dir = "./quizmark-attempts"

[mastery]
mastered = 90
proficient = 75
developing = 60
strength_accuracy = 75
min_questions = 3
highlight_count = 3

[planner]
window_days = 7
attention_accuracy = 70
strong_accuracy = 75
min_questions = 3

# Replace the default topic catalog by listing topics here.
# [[topics]]
# code = "A1"
# name = "Quadratic Functions"
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "title": "Example Quiz",
  "topic": "A1",
  "week": 1,
  "difficulty": "foundational",
  "time_limit_minutes": 15,
  "due_date": "2099-01-01T09:00:00Z",
  "questions": [
    {
      "id": 1,
      "type": "single_choice",
      "question": "How many real roots does x^2 - 4 = 0 have?",
      "options": ["0", "1", "2", "4"],
      "correctAnswer": "C",
      "marks": 2
    },
    {
      "id": 2,
      "type": "multi_select",
      "question": "Which values of x satisfy x^2 = 9?",
      "options": ["-3", "0", "3", "9"],
      "correctAnswers": ["A", "C"],
      "partialCredit": true,
      "marks": 4
    }
  ]
}
"#;
