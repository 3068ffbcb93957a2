// src/seed.rs

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::question::{Choice, KIND_MULTI, KIND_SINGLE};
use crate::models::quiz::Quiz;

/// Slug of the built-in quiz. Sessions started without an explicit quiz
/// attach to it.
pub const DEFAULT_QUIZ_SLUG: &str = "demo";

const DEFAULT_QUIZ_TITLE: &str = "PodoTest • Formation vendeurs";

/// Looks up the quiz by slug, creating it if absent, and marks it active.
/// The question catalog is inserted only when the quiz has zero questions,
/// so repeated calls never duplicate rows.
pub async fn ensure_quiz(pool: &SqlitePool, slug: &str) -> Result<Quiz, AppError> {
    let quiz = match Quiz::find_by_slug(pool, slug).await? {
        Some(quiz) => {
            sqlx::query("UPDATE quizzes SET is_active = TRUE WHERE id = ?")
                .bind(quiz.id)
                .execute(pool)
                .await?;
            Quiz {
                is_active: true,
                ..quiz
            }
        }
        None => {
            tracing::info!("Creating quiz '{}'", slug);
            sqlx::query("INSERT INTO quizzes (title, slug, is_active) VALUES (?, ?, TRUE)")
                .bind(DEFAULT_QUIZ_TITLE)
                .bind(slug)
                .execute(pool)
                .await?;
            Quiz::find_by_slug(pool, slug).await?.ok_or_else(|| {
                AppError::InternalServerError("Failed to retrieve created quiz".to_string())
            })?
        }
    };

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = ?")
        .bind(quiz.id)
        .fetch_one(pool)
        .await?;

    if existing == 0 {
        tracing::info!("Seeding question catalog for quiz '{}'", slug);
        for (kind, topic, content, choices) in builtin_questions() {
            sqlx::query(
                "INSERT INTO questions (quiz_id, kind, topic, content, choices) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(quiz.id)
            .bind(kind)
            .bind(topic)
            .bind(content)
            .bind(serde_json::to_string(&choices)?)
            .execute(pool)
            .await?;
        }
    }

    Ok(quiz)
}

fn choice(id: &str, label: &str, is_correct: bool) -> Choice {
    Choice {
        id: id.to_string(),
        label: label.to_string(),
        is_correct,
        feedback: None,
    }
}

/// The built-in podiatry training catalog. Candidate sessions draw a random
/// subset of these.
fn builtin_questions() -> Vec<(&'static str, &'static str, &'static str, Vec<Choice>)> {
    vec![
        (
            KIND_SINGLE,
            "Hallux Valgus",
            "Un client a un hallux valgus (oignon au gros orteil). Quelle chaussure lui recommandez-vous ?",
            vec![
                choice("A", "Chaussure bout pointu avec talon haut", false),
                choice("B", "Chaussure large, cuir souple, sans coutures ni œillets", true),
                choice("C", "Chaussure de sport synthétique", false),
                choice("D", "Sandale à talon compensé", false),
            ],
        ),
        (
            KIND_MULTI,
            "Mycose & Hygiène",
            "Un client a souvent des mycoses aux pieds. Quels conseils lui donner ? (plusieurs réponses)",
            vec![
                choice("A", "Bien sécher entre les orteils après la douche", true),
                choice("B", "Garder toujours les mêmes chaussures fermées", false),
                choice("C", "Changer les chaussettes souvent et les laver à 60 °C", true),
                choice("D", "Alterner ses chaussures pour les laisser sécher", true),
            ],
        ),
        (
            KIND_SINGLE,
            "Épine calcanéenne",
            "Un client a mal sous le talon, surtout le matin au lever. Parmi ces facteurs, lequel vient de l'extérieur (facteur externe) ?",
            vec![
                choice("A", "Avoir un pied creux", false),
                choice("B", "Être en surpoids", false),
                choice("C", "Porter de mauvaises chaussures", true),
                choice("D", "Avoir un centre de gravité mal placé", false),
            ],
        ),
        (
            KIND_MULTI,
            "Ongle incarné",
            "Quelles sont les causes courantes d'un ongle incarné ? (plusieurs réponses)",
            vec![
                choice("A", "Couper les ongles trop courts ou arrondis", true),
                choice("B", "Porter des chaussures trop serrées", true),
                choice("C", "Marcher pieds nus sur la plage", false),
                choice("D", "Avoir un ongle très courbé", true),
            ],
        ),
        (
            KIND_SINGLE,
            "Pied plat",
            "Un client a un pied plat douloureux. Quelle chaussure évite d'aggraver le problème ?",
            vec![
                choice("A", "Chaussure souple en tissu", false),
                choice("B", "Chaussure rigide en cuir avec bon maintien", true),
                choice("C", "Tong légère pour ne pas contraindre le pied", false),
                choice("D", "Chaussure sans coutures avec petit talon", false),
            ],
        ),
        (
            KIND_MULTI,
            "Pied creux",
            "Quels problèmes sont souvent causés par un pied creux ? (plusieurs réponses)",
            vec![
                choice("A", "Entorses de cheville à répétition", true),
                choice("B", "Pronation excessive (pied qui s'écrase vers l'intérieur)", false),
                choice("C", "Griffes d'orteils", true),
                choice("D", "Durillons sous le talon et l'avant-pied", true),
            ],
        ),
        (
            KIND_SINGLE,
            "Griffes d'orteils",
            "Un client a les orteils en griffes. Quel est le critère le plus important dans le choix de la chaussure ?",
            vec![
                choice("A", "Une semelle très amortissante", false),
                choice("B", "Une empeigne haute pour éviter le frottement sur les orteils", true),
                choice("C", "Un talon haut pour soulager l'avant-pied", false),
                choice("D", "Une chaussure étroite pour maintenir les orteils", false),
            ],
        ),
        (
            KIND_MULTI,
            "Varices & Œdèmes",
            "Un client souffre de jambes lourdes et de varices. Que lui conseillez-vous ? (plusieurs réponses)",
            vec![
                choice("A", "Des bas de compression", true),
                choice("B", "Des chaussures très serrées pour soutenir la cheville", false),
                choice("C", "Des semelles adaptées au retour veineux", true),
                choice("D", "Bouger régulièrement, marcher", true),
            ],
        ),
        (
            KIND_SINGLE,
            "Genu valgum / varum",
            "Un client a les genoux en X (genu valgum). Quel type de semelle orthopédique est indiqué ?",
            vec![
                choice("A", "Semelle avec éléments pronateurs (soutien côté intérieur)", false),
                choice("B", "Semelle avec éléments supinateurs (soutien côté extérieur)", true),
                choice("C", "Semelle molle sans correction", false),
                choice("D", "Aucune semelle, seule la chirurgie aide", false),
            ],
        ),
        (
            KIND_SINGLE,
            "Cors & Durillons",
            "Qu'est-ce qui provoque la formation d'un cor sur le pied ?",
            vec![
                choice("A", "Une infection de la peau", false),
                choice("B", "Un frottement ou une pression répétée au même endroit", true),
                choice("C", "Un manque de vitamines", false),
                choice("D", "Une allergie au cuir", false),
            ],
        ),
        (
            KIND_MULTI,
            "Verrues plantaires",
            "Où attrape-t-on le plus souvent des verrues plantaires ? (plusieurs réponses)",
            vec![
                choice("A", "À la piscine", true),
                choice("B", "Dans les vestiaires communs", true),
                choice("C", "En portant des chaussures en cuir", false),
                choice("D", "En salle de fitness", true),
            ],
        ),
    ]
}
