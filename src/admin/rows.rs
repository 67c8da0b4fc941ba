//! How each collection is shown in its admin table.

use super::collection::{EntityText, Listed};
use super::surface::{Cell, EditField, Row, RowAction};
use super::Route;
use crate::models::document::UNCATEGORIZED;
use crate::models::{format_brl, ContactMessage, Document, DocumentCategory, Donation, Project, ProjectStatus};

fn short_date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|at| at.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

impl Listed for Document {
    const ROUTE: Route = Route::Documents;
    const COLUMNS: &'static [&'static str] = &["Título", "Categoria", "Enviado em", "Ações"];
    const TEXT: EntityText = EntityText {
        created: "Documento salvo com sucesso!",
        updated: "Documento atualizado com sucesso!",
        deleted: "Registro excluído com sucesso!",
        confirm_delete: "Tem certeza que deseja excluir o registro deste documento?",
        save_failed: "Ocorreu um erro ao salvar o documento.",
        delete_failed: "Ocorreu um erro ao excluir o registro.",
        load_failed: "Erro ao carregar documentos.",
    };

    fn row(&self) -> Row {
        Row {
            id: self.id.clone(),
            cells: vec![
                Cell::link(&self.title, &self.file_url),
                Cell::text(self.category_bucket()),
                Cell::text(short_date(self.created_at)),
            ],
            actions: vec![RowAction::Edit, RowAction::Delete],
            edit_fields: vec![
                EditField::text("title", "Título", &self.title),
                EditField::select("category", "Categoria", self.category.trim(), DocumentCategory::labels())
                    .with_blank(UNCATEGORIZED),
            ],
        }
    }
}

impl Listed for Project {
    const ROUTE: Route = Route::Projects;
    const COLUMNS: &'static [&'static str] = &["Título", "Status", "Descrição", "Ações"];
    const TEXT: EntityText = EntityText {
        created: "Projeto salvo com sucesso!",
        updated: "Projeto atualizado com sucesso!",
        deleted: "Projeto excluído com sucesso!",
        confirm_delete: "Tem certeza que deseja excluir este projeto?",
        save_failed: "Ocorreu um erro ao salvar o projeto.",
        delete_failed: "Ocorreu um erro ao excluir o projeto.",
        load_failed: "Erro ao carregar projetos.",
    };

    fn row(&self) -> Row {
        Row {
            id: self.id.clone(),
            cells: vec![
                Cell::text(&self.title),
                Cell::text(&self.status),
                Cell::text(&self.description),
            ],
            actions: vec![RowAction::Edit, RowAction::Delete],
            edit_fields: vec![
                EditField::text("title", "Título", &self.title),
                EditField::text("description", "Descrição", &self.description),
                EditField::select("status", "Status", &self.status, ProjectStatus::labels()),
            ],
        }
    }
}

impl Listed for Donation {
    const ROUTE: Route = Route::Donations;
    const COLUMNS: &'static [&'static str] = &["Doador", "Valor", "Data", "Ações"];
    const TEXT: EntityText = EntityText {
        created: "Doação registrada com sucesso!",
        updated: "Doação atualizada com sucesso!",
        deleted: "Doação excluída com sucesso!",
        confirm_delete: "Tem certeza que deseja excluir esta doação?",
        save_failed: "Ocorreu um erro ao registrar a doação.",
        delete_failed: "Ocorreu um erro ao excluir a doação.",
        load_failed: "Erro ao carregar doações.",
    };

    fn row(&self) -> Row {
        Row {
            id: self.id.clone(),
            cells: vec![
                Cell::text(&self.donor),
                Cell::text(format_brl(self.amount)),
                Cell::text(self.date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()),
            ],
            actions: vec![RowAction::Delete],
            edit_fields: vec![],
        }
    }
}

impl Listed for ContactMessage {
    const ROUTE: Route = Route::Messages;
    const COLUMNS: &'static [&'static str] = &["Nome", "E-mail", "Mensagem", "Recebida em", "Ações"];
    const TEXT: EntityText = EntityText {
        created: "Mensagem enviada com sucesso!",
        updated: "Mensagem atualizada com sucesso!",
        deleted: "Mensagem excluída com sucesso!",
        confirm_delete: "Tem certeza que deseja excluir esta mensagem?",
        save_failed: "Ocorreu um erro. Tente novamente.",
        delete_failed: "Ocorreu um erro ao excluir a mensagem.",
        load_failed: "Erro ao carregar mensagens.",
    };

    fn row(&self) -> Row {
        Row {
            id: self.id.clone(),
            cells: vec![
                Cell::text(&self.name),
                Cell::link(&self.email, format!("mailto:{}", self.email)),
                Cell::text(&self.message),
                Cell::text(short_date(self.submitted_at)),
            ],
            actions: vec![RowAction::Delete],
            edit_fields: vec![],
        }
    }
}
