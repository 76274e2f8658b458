#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
	Member,
	Manager,
	Admin,
}
impl Role {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"MEMBER" => Some(Self::Member),
			"MANAGER" => Some(Self::Manager),
			"ADMIN" => Some(Self::Admin),
			_ => None,
		}
	}

	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Member => "MEMBER",
			Self::Manager => "MANAGER",
			Self::Admin => "ADMIN",
		}
	}
}
