//! Building, room and occupancy endpoints.

use reqwest::Method;

use super::client::segment;
use super::{ApiClient, ApiError, BuildingApi, OccupancyApi, RoomApi};
use crate::models::{Building, Room, RoomOccupancy};

impl BuildingApi for ApiClient {
    async fn list_buildings(&self) -> Result<Vec<Building>, ApiError> {
        let response = self.send(self.request(Method::GET, "/buildings")).await?;
        Ok(response.json().await?)
    }

    async fn create_building(&self, building: &Building) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/buildings").json(building);
        self.send(builder).await?;
        Ok(())
    }

    async fn update_building(&self, id: &str, building: &Building) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/buildings/{}", segment(id)))
            .json(building);
        self.send(builder).await?;
        Ok(())
    }

    async fn delete_building(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/buildings/{}", segment(id)));
        self.send(builder).await?;
        Ok(())
    }
}

impl RoomApi for ApiClient {
    async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response = self.send(self.request(Method::GET, "/rooms")).await?;
        Ok(response.json().await?)
    }

    async fn room_by_id(&self, id: &str) -> Result<Room, ApiError> {
        let builder = self.request(Method::GET, &format!("/rooms/{}", segment(id)));
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    async fn create_room(&self, room: &Room) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/rooms").json(room);
        self.send(builder).await?;
        Ok(())
    }

    async fn update_room(&self, id: &str, room: &Room) -> Result<(), ApiError> {
        // The update endpoint takes the id from the body
        let mut body = room.clone();
        body.id = Some(id.to_string());
        let builder = self.request(Method::PUT, "/rooms").json(&body);
        self.send(builder).await?;
        Ok(())
    }

    async fn delete_room(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/rooms/{}", segment(id)));
        self.send(builder).await?;
        Ok(())
    }
}

impl OccupancyApi for ApiClient {
    async fn occupancy_dashboard(&self) -> Result<RoomOccupancy, ApiError> {
        let response = self
            .send(self.request(Method::GET, "/bookings/dashboard"))
            .await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
        routing::{get, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded(Arc<Mutex<Vec<String>>>);

    impl Recorded {
        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    async fn spawn_server(recorded: Recorded) -> String {
        let app = Router::new()
            .route(
                "/buildings",
                get(|| async {
                    Json(json!([
                        {"id": "b1", "buildingName": "North", "address": "Yard road",
                         "floors": "3", "description": ""},
                        {"id": "b2", "buildingName": "South", "address": "Platform 4",
                         "floors": 2}
                    ]))
                })
                .post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                    rec.push(format!(
                        "create building {} {} {}",
                        body["buildingName"], body["floors"], body.get("id").is_some()
                    ));
                    StatusCode::CREATED
                }),
            )
            .route(
                "/buildings/{id}",
                put(
                    |State(rec): State<Recorded>,
                     Path(id): Path<String>,
                     Json(body): Json<Value>| async move {
                        rec.push(format!("update building {} {}", id, body["address"]));
                        StatusCode::OK
                    },
                )
                .delete(|Path(id): Path<String>| async move {
                    if id == "b1" {
                        (
                            StatusCode::CONFLICT,
                            Json(json!({"message": "Building still has rooms"})),
                        )
                            .into_response()
                    } else {
                        StatusCode::NO_CONTENT.into_response()
                    }
                }),
            )
            .route(
                "/rooms",
                get(|| async {
                    Json(json!([
                        {"id": "r1", "roomNumber": "N101", "roomType": "DOUBLE", "ac": true,
                         "capacity": 2, "floor": 1, "buildingId": "b1", "crewType": "LOCO_PILOT",
                         "roomCategory": "RUNNING", "beds": 2, "attachment": "ATTACHED",
                         "status": "ACTIVE", "tenantId": "t1"}
                    ]))
                })
                .post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                    rec.push(format!("create room {} {}", body["roomNumber"], body["bedCount"]));
                    StatusCode::CREATED
                })
                .put(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                    rec.push(format!("update room {} {}", body["id"], body["status"]));
                    StatusCode::OK
                }),
            )
            .route(
                "/rooms/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "r1" {
                        Json(json!({"id": "r1", "roomNumber": "N101", "bedCount": 2,
                                    "buildingId": "b1"}))
                        .into_response()
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({"message": "Room not found"})))
                            .into_response()
                    }
                })
                .delete(|State(rec): State<Recorded>, Path(id): Path<String>| async move {
                    rec.push(format!("delete room {}", id));
                    StatusCode::NO_CONTENT
                }),
            )
            .route(
                "/bookings/dashboard",
                get(|| async {
                    Json(json!({
                        "N101": [
                            {"bedNumber": "1", "occupancyStatus": "OCCUPIED",
                             "crewName": "R. Kumar", "restHours": 8},
                            {"bedNumber": "2", "occupancyStatus": "AVAILABLE", "crewName": ""}
                        ]
                    }))
                }),
            )
            .with_state(recorded);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn client() -> (ApiClient, Recorded) {
        let recorded = Recorded::default();
        let base = spawn_server(recorded.clone()).await;
        (ApiClient::new(base, None, None).unwrap(), recorded)
    }

    #[tokio::test]
    async fn test_list_buildings_mixed_floor_types() {
        let (client, _) = client().await;
        let buildings = client.list_buildings().await.unwrap();

        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0].floors, 3);
        assert_eq!(buildings[1].floors, 2);
        assert_eq!(buildings[1].id.as_deref(), Some("b2"));
    }

    #[tokio::test]
    async fn test_building_mutations() {
        let (client, recorded) = client().await;
        let building = Building::new("East", "Loco shed", 1);

        client.create_building(&building).await.unwrap();
        client.update_building("b2", &building).await.unwrap();
        client.delete_building("b2").await.unwrap();

        assert_eq!(
            recorded.entries(),
            vec![
                "create building \"East\" 1 false",
                "update building b2 \"Loco shed\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_building_conflict_message() {
        let (client, _) = client().await;
        let err = client.delete_building("b1").await.unwrap_err();
        assert_eq!(
            err.display_message("Failed to delete building"),
            "Building still has rooms"
        );
    }

    #[tokio::test]
    async fn test_rooms() {
        let (client, recorded) = client().await;

        let rooms = client.list_rooms().await.unwrap();
        assert_eq!(rooms[0].bed_count, 2);
        assert!(rooms[0].ac);

        let room = client.room_by_id("r1").await.unwrap();
        assert_eq!(room.room_number, "N101");
        let missing = client.room_by_id("r9").await.unwrap_err();
        assert!(missing.is_not_found());

        client.create_room(&rooms[0]).await.unwrap();
        let mut changed = room.clone();
        changed.id = None;
        changed.status = "MAINTENANCE".to_string();
        client.update_room("r1", &changed).await.unwrap();
        client.delete_room("r1").await.unwrap();

        assert_eq!(
            recorded.entries(),
            vec![
                "create room \"N101\" 2",
                "update room \"r1\" \"MAINTENANCE\"",
                "delete room r1",
            ]
        );
    }

    #[tokio::test]
    async fn test_occupancy_dashboard() {
        let (client, _) = client().await;
        let rooms = client.occupancy_dashboard().await.unwrap();

        let beds = &rooms["N101"];
        assert_eq!(beds.len(), 2);
        assert_eq!(beds[0].crew_name.as_deref(), Some("R. Kumar"));
        assert_eq!(beds[1].crew_name, None);
    }
}
