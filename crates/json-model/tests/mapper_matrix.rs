//! Mapper behaviour matrix: renames, ignore sets, decoder maps, lenient
//! decoding and inheritance.

use std::collections::BTreeMap;

use json_model::{json_model, AnyModel, JsonMap, ListItem, Mapper, Model, ModelList, Registry, Value};
use serde_json::json;

json_model! {
    pub struct Profile {
        pub user_name: String => "userName",
    }
}

json_model! {
    pub struct Account {
        pub username: String,
        pub password: String,
    }
}

json_model! {
    pub struct Address {
        pub city: String,
        pub zip: Option<String>,
    }
}

json_model! {
    pub struct Member {
        pub name: String,
        pub admin: bool,
    }
}

json_model! {
    pub struct Team {
        pub title: String,
        pub members: ModelList,
        pub tags: ModelList,
        pub address: Address,
        pub scores: Vec<i64>,
        pub meta: BTreeMap<String, Value>,
    }
}

json_model! {
    pub struct Animal {
        pub name: String,
        pub legs: u8,
        pub secret: String,
    }
}

json_model! {
    pub struct Dog extends Animal as animal {
        pub breed: String,
        pub owner_note: String,
    }
}

fn obj(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[test]
fn rename_scenario_discards_undeclared_keys() {
    let registry = Registry::new();
    registry.set_rename(Profile::kind(), [("usr_nm", "userName")]);
    let mapper = Mapper::new(&registry);

    let profile: Profile = mapper.decode(&obj(json!({"usr_nm": "alice", "age": 30})));
    assert_eq!(profile.user_name, "alice");

    let encoded = mapper.encode(&profile).unwrap();
    assert_eq!(Value::Object(encoded), json!({"usr_nm": "alice"}));
}

#[test]
fn rename_is_bidirectional_for_declared_properties() {
    let registry = Registry::new();
    registry.set_rename(Animal::kind(), [("n", "name"), ("leg_count", "legs")]);
    for property in Animal::properties() {
        let key = registry.json_key(Animal::kind(), property.name());
        assert_eq!(registry.property_name(Animal::kind(), &key), property.name());
    }
}

#[test]
fn unrenamed_key_matching_a_property_still_decodes() {
    let registry = Registry::new();
    registry.set_rename(Profile::kind(), [("usr_nm", "userName")]);
    let mapper = Mapper::new(&registry);
    let profile: Profile = mapper.decode(&obj(json!({"userName": "direct"})));
    assert_eq!(profile.user_name, "direct");
}

// ---------------------------------------------------------------------------
// Ignore
// ---------------------------------------------------------------------------

#[test]
fn ignore_scenario_drops_password() {
    let registry = Registry::new();
    registry.set_ignore(Account::kind(), ["password"]);
    let mapper = Mapper::new(&registry);
    let account = Account {
        username: "bob".to_string(),
        password: "secret".to_string(),
    };
    assert_eq!(
        Value::Object(mapper.encode(&account).unwrap()),
        json!({"username": "bob"})
    );
}

#[test]
fn ignored_properties_are_lost_on_round_trip() {
    let registry = Registry::new();
    registry.set_ignore(Account::kind(), ["password"]);
    let mapper = Mapper::new(&registry);
    let account = Account {
        username: "bob".to_string(),
        password: "secret".to_string(),
    };
    let back: Account = mapper.decode(&mapper.encode(&account).unwrap());
    assert_eq!(back.username, "bob");
    assert_eq!(back.password, "");
}

#[test]
fn ignore_set_does_not_affect_decode() {
    let registry = Registry::new();
    registry.set_ignore(Account::kind(), ["password"]);
    let mapper = Mapper::new(&registry);
    let account: Account = mapper.decode(&obj(json!({"username": "bob", "password": "pw"})));
    assert_eq!(account.password, "pw");
}

// ---------------------------------------------------------------------------
// Lenient decode
// ---------------------------------------------------------------------------

#[test]
fn unknown_keys_do_not_touch_declared_properties() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let with_extra: Animal = mapper.decode(&obj(json!({"name": "cat", "legs": 4, "wings": 2})));
    let without: Animal = mapper.decode(&obj(json!({"name": "cat", "legs": 4})));
    assert_eq!(with_extra, without);
}

#[test]
fn type_mismatches_leave_defaults() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let animal: Animal = mapper.decode(&obj(json!({"name": 12, "legs": "four", "secret": "s"})));
    assert_eq!(animal.name, "");
    assert_eq!(animal.legs, 0);
    assert_eq!(animal.secret, "s");

    let animal: Animal = mapper.decode(&obj(json!({"legs": 300})));
    assert_eq!(animal.legs, 0);
}

#[test]
fn null_values_are_not_assignments() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let address: Address = mapper.decode(&obj(json!({"city": null, "zip": null})));
    assert_eq!(address, Address::default());
}

#[test]
fn non_object_input_yields_default() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    assert_eq!(mapper.decode_value::<Animal>(&json!([1, 2])), Animal::default());
    assert_eq!(mapper.decode_value::<Animal>(&json!("x")), Animal::default());
}

#[test]
fn nested_model_with_wrong_shape_stays_default() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let team: Team = mapper.decode(&obj(json!({"title": "t", "address": "somewhere"})));
    assert_eq!(team.title, "t");
    assert_eq!(team.address, Address::default());
}

// ---------------------------------------------------------------------------
// Nested models, lists and maps
// ---------------------------------------------------------------------------

#[test]
fn nested_models_decode_with_declared_type() {
    let registry = Registry::new();
    registry.set_rename(Address::kind(), [("postal_code", "zip")]);
    let mapper = Mapper::new(&registry);
    let team: Team = mapper.decode(&obj(json!({
        "address": {"city": "Oslo", "postal_code": "0150"}
    })));
    assert_eq!(team.address.city, "Oslo");
    assert_eq!(team.address.zip.as_deref(), Some("0150"));
}

#[test]
fn list_without_decoder_keeps_raw_values_in_order() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let raw = json!([{"name": "a"}, 3, "x", null]);
    let team: Team = mapper.decode(&obj(json!({ "members": raw.clone() })));
    assert_eq!(team.members.len(), 4);
    let items: Vec<Value> = team
        .members
        .iter()
        .map(|item| item.as_raw().cloned().unwrap())
        .collect();
    assert_eq!(Value::Array(items), raw);
}

#[test]
fn list_with_decoder_decodes_each_element() {
    let registry = Registry::new();
    registry.set_decoders(Team::kind(), [("members", Member::kind())]);
    let mapper = Mapper::new(&registry);
    let elements = vec![json!({"name": "a", "admin": true}), json!({"name": "b"})];
    let team: Team = mapper.decode(&obj(json!({
        "members": elements.clone(),
        "tags": elements.clone(),
    })));

    for (i, element) in elements.iter().enumerate() {
        let expected: Member = mapper.decode_value(element);
        assert_eq!(team.members.model::<Member>(i), Some(&expected));
    }
    // The decoder entry is per property.
    assert_eq!(team.tags.raw(0), Some(&elements[0]));
}

#[test]
fn decoder_entries_follow_renamed_property_names() {
    let registry = Registry::new();
    registry.set_rename(Team::kind(), [("people", "members")]);
    registry.set_decoders(Team::kind(), [("members", Member::kind())]);
    let mapper = Mapper::new(&registry);
    let team: Team = mapper.decode(&obj(json!({"people": [{"name": "z"}]})));
    assert_eq!(team.members.model::<Member>(0).map(|m| m.name.as_str()), Some("z"));

    let list = mapper.decode_list(Team::kind(), "people", &[json!({"name": "y"})]);
    assert_eq!(list.model::<Member>(0).map(|m| m.name.as_str()), Some("y"));
}

#[test]
fn team_round_trips_through_encode_and_decode() {
    let registry = Registry::new();
    registry.set_decoders(Team::kind(), [("members", Member::kind())]);
    let mapper = Mapper::new(&registry);

    let mut members = ModelList::new();
    members.push_model(Member {
        name: "ann".to_string(),
        admin: true,
    });
    members.push_model(Member {
        name: "bo".to_string(),
        admin: false,
    });
    let tags: ModelList = vec![ListItem::from(json!("red")), ListItem::from(json!(7))].into();
    let mut meta = BTreeMap::new();
    meta.insert("k".to_string(), json!({"deep": [1, 2]}));

    let team = Team {
        title: "core".to_string(),
        members,
        tags,
        address: Address {
            city: "Bergen".to_string(),
            zip: Some("5003".to_string()),
        },
        scores: vec![3, -1, 99],
        meta,
    };

    let encoded = mapper.encode(&team).unwrap();
    assert_eq!(encoded["members"][0], json!({"name": "ann", "admin": true}));
    assert_eq!(encoded["meta"], json!({"k": {"deep": [1, 2]}}));
    assert_eq!(mapper.decode::<Team>(&encoded), team);
}

// ---------------------------------------------------------------------------
// Inheritance
// ---------------------------------------------------------------------------

#[test]
fn subtype_encodes_inherited_and_own_properties() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let mut dog = Dog {
        breed: "husky".to_string(),
        ..Default::default()
    };
    dog.name = "rex".to_string();
    dog.legs = 4;
    let keys: Vec<String> = mapper.encode(&dog).unwrap().keys().cloned().collect();
    assert_eq!(keys, ["name", "legs", "secret", "breed", "owner_note"]);
}

#[test]
fn subtype_inherits_then_overrides_configuration() {
    let registry = Registry::new();
    registry.set_ignore(Animal::kind(), ["secret"]);
    registry.set_rename(Animal::kind(), [("animal_name", "name")]);
    let mapper = Mapper::new(&registry);

    let dog = Dog::default();
    let encoded = mapper.encode(&dog).unwrap();
    assert!(encoded.contains_key("animal_name"));
    assert!(!encoded.contains_key("secret"));

    registry.set_ignore(Dog::kind(), ["owner_note"]);
    let encoded = mapper.encode(&dog).unwrap();
    assert!(encoded.contains_key("secret"));
    assert!(!encoded.contains_key("owner_note"));

    // The parent keeps its own configuration.
    assert!(!mapper.encode(&Animal::default()).unwrap().contains_key("secret"));
}

#[test]
fn subtype_decodes_inherited_properties_through_inherited_renames() {
    let registry = Registry::new();
    registry.set_rename(Animal::kind(), [("animal_name", "name")]);
    let mapper = Mapper::new(&registry);
    let dog: Dog = mapper.decode(&obj(json!({"animal_name": "rex", "breed": "lab", "legs": 3})));
    assert_eq!(dog.animal.name, "rex");
    assert_eq!(dog.legs, 3);
    assert_eq!(dog.breed, "lab");
}

#[test]
fn dynamic_elements_encode_with_their_runtime_type() {
    let registry = Registry::new();
    registry.set_ignore(Dog::kind(), ["owner_note"]);
    let mapper = Mapper::new(&registry);
    let mut list = ModelList::new();
    list.push_model(Animal {
        name: "cat".to_string(),
        legs: 4,
        secret: String::new(),
    });
    list.push_model(Dog {
        breed: "pug".to_string(),
        ..Default::default()
    });
    let encoded = mapper.serialize(&list).unwrap();
    assert_eq!(encoded[0].as_object().unwrap().len(), 3);
    assert_eq!(encoded[1]["breed"], json!("pug"));
    assert!(encoded[1].get("owner_note").is_none());

    let boxed = list.get(1).and_then(ListItem::as_model).unwrap();
    assert_eq!(boxed.model_kind(), Dog::kind());
    assert!(mapper.encode_dyn(boxed).unwrap().contains_key("breed"));
}

#[test]
fn decoder_kind_builds_boxed_instances() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let boxed = Dog::kind().decode(&mapper, &obj(json!({"breed": "lab"})));
    assert!(boxed.is::<Dog>());
    assert_eq!(boxed.downcast_ref::<Dog>().map(|d| d.breed.as_str()), Some("lab"));
}

json_model! {
    pub struct Gauge {
        pub level: f32,
        pub label: String,
    }
}

#[test]
fn out_of_range_f32_keeps_default_and_stays_encodable() {
    let registry = Registry::new();
    let mapper = Mapper::new(&registry);
    let gauge: Gauge = mapper.decode_value(&json!({"level": 1e300, "label": "tank"}));
    assert_eq!(gauge.level, 0.0);
    assert_eq!(gauge.label, "tank");
    assert_eq!(
        Value::Object(mapper.encode(&gauge).unwrap()),
        json!({"level": 0.0, "label": "tank"})
    );
}
