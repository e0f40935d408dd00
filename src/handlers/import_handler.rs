use actix_web::{
    get,
    http::header::{ContentDisposition, DispositionParam, DispositionType, CONTENT_TYPE},
    post, web, HttpRequest, HttpResponse,
};

use crate::{
    auth::{require_admin, AuthenticatedUser},
    errors::{AppError, ImportError},
    importer::{
        self,
        template::{csv_template, TEMPLATE_FILENAME},
    },
    middleware::get_request_id,
    models::dto::{request::ImportQuestionsRequest, response::ImportQuestionsResponse},
};

const TEMPLATE_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Parses an uploaded workbook into reviewable records. Nothing is stored.
///
/// The body is decoded here rather than through `web::Json` so a malformed
/// request still gets the import failure envelope.
#[post("/questions/import")]
pub async fn import_questions(
    req: HttpRequest,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let ImportQuestionsRequest { file, filename } = serde_json::from_slice(&body)
        .map_err(|e| ImportError::InvalidRequest(e.to_string()))?;
    log::info!(
        "[{}] Importing '{}' ({} bytes)",
        get_request_id(&req).unwrap_or_default(),
        filename,
        file.len()
    );

    let report = web::block(move || importer::import_workbook(&file, &filename)).await??;
    Ok(HttpResponse::Ok().json(ImportQuestionsResponse::from(report)))
}

#[get("/questions/template")]
pub async fn download_template(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let body = csv_template()?;
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, TEMPLATE_CONTENT_TYPE))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(TEMPLATE_FILENAME.to_string())],
        })
        .body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{AuthMiddleware, Role},
        importer::EXPECTED_HEADERS,
        test_utils::{test_app_data, test_helpers::assert_error_status, token_for},
    };
    use actix_web::{http::StatusCode, test, App};
    use rust_xlsxwriter::Workbook;

    fn workbook(rows: &[[&str; 10]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in EXPECTED_HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32 + 1, col as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    macro_rules! init_app {
        ($jwt:expr) => {
            test::init_service(
                App::new().app_data(web::Data::new($jwt.clone())).service(
                    web::scope("/api/admin")
                        .wrap(AuthMiddleware)
                        .service(download_template)
                        .service(import_questions),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_import_returns_report() {
        let (_, jwt, repo) = test_app_data();
        let token = format!("Bearer {}", token_for(&jwt, Role::Admin));
        let app = init_app!(jwt);

        let bytes = workbook(&[
            ["Q1", "a", "b", "", "", "B", "", "睡眠", "easy", ""],
            ["", "a", "b", "", "", "A", "", "睡眠", "", ""],
        ]);
        let req = test::TestRequest::post()
            .uri("/api/admin/questions/import")
            .insert_header(("Authorization", token))
            .set_json(serde_json::json!({ "file": bytes, "filename": "q.xlsx" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["total"], 2);
        assert_eq!(json["valid"], 1);
        assert_eq!(json["invalid"], 1);
        assert_eq!(json["questions"][0]["correct_answer"], 1);
        assert_eq!(json["questions"][0]["source"], "Excel导入");
        assert_eq!(json["errors"][0], "row 3: 题目内容不能为空");
        // import never persists
        assert_eq!(repo.len().await, 0);
    }

    #[actix_web::test]
    async fn test_import_without_file_is_failure_envelope() {
        let (_, jwt, _) = test_app_data();
        let token = format!("Bearer {}", token_for(&jwt, Role::Admin));
        let app = init_app!(jwt);

        let req = test::TestRequest::post()
            .uri("/api/admin/questions/import")
            .insert_header(("Authorization", token))
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "未提供文件");
    }

    #[actix_web::test]
    async fn test_import_with_malformed_body_is_failure_envelope() {
        let (_, jwt, _) = test_app_data();
        let token = format!("Bearer {}", token_for(&jwt, Role::Admin));
        let app = init_app!(jwt);

        let req = test::TestRequest::post()
            .uri("/api/admin/questions/import")
            .insert_header(("Authorization", token))
            .set_json(serde_json::json!({ "file": "not-bytes" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().starts_with("请求格式错误"));
        assert!(json.get("code").is_none());
    }

    #[actix_web::test]
    async fn test_template_download() {
        let (_, jwt, _) = test_app_data();
        let token = format!("Bearer {}", token_for(&jwt, Role::Admin));
        let app = init_app!(jwt);

        let req = test::TestRequest::get()
            .uri("/api/admin/questions/template")
            .insert_header(("Authorization", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            TEMPLATE_CONTENT_TYPE
        );
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains(TEMPLATE_FILENAME));

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("\"题目内容\",\"选项A\""));
    }
}
