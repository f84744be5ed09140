use ombaro_application::SubmitVendorApplicationInput;
use ombaro_domain::{ApprovalHistoryRecord, BusinessAddress, VendorApplication};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::common::format_timestamp;

/// Postal address of a vendor business.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/business-address.ts"
)]
pub struct BusinessAddressDto {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// API representation of a vendor application.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/vendor-application-response.ts"
)]
pub struct VendorApplicationResponse {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    pub business_type: String,
    pub contact_person: String,
    pub contact_mobile: String,
    pub contact_email: String,
    pub business_address: BusinessAddressDto,
    #[ts(type = "unknown")]
    pub application_data: Value,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for a partner application.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/submit-vendor-application-request.ts"
)]
pub struct SubmitVendorApplicationRequest {
    pub business_name: String,
    pub business_type: String,
    pub contact_person: String,
    pub contact_mobile: String,
    pub contact_email: String,
    pub business_address: BusinessAddressDto,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub application_data: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorApplicationListQuery {
    pub status: Option<String>,
}

/// Incoming payload for an approval.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/approve-vendor-application-request.ts"
)]
pub struct ApproveVendorApplicationRequest {
    pub comments: Option<String>,
}

/// Incoming payload for a rejection.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/reject-vendor-application-request.ts"
)]
pub struct RejectVendorApplicationRequest {
    pub reason: String,
}

/// Incoming payload for requesting more documents.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/request-vendor-info-request.ts"
)]
pub struct RequestVendorInfoRequest {
    pub note: String,
}

/// API representation of one review action.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/approval-history-response.ts"
)]
pub struct ApprovalHistoryResponse {
    pub id: String,
    pub application_id: String,
    pub approved_by: String,
    pub action: String,
    pub comments: Option<String>,
    pub created_at: String,
}

impl From<BusinessAddress> for BusinessAddressDto {
    fn from(address: BusinessAddress) -> Self {
        Self {
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

impl From<BusinessAddressDto> for BusinessAddress {
    fn from(address: BusinessAddressDto) -> Self {
        Self {
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            state: address.state,
            pincode: address.pincode,
        }
    }
}

impl From<VendorApplication> for VendorApplicationResponse {
    fn from(application: VendorApplication) -> Self {
        Self {
            id: application.id.to_string(),
            user_id: application.user_id.to_string(),
            business_name: application.business_name.as_str().to_owned(),
            business_type: application.business_type,
            contact_person: application.contact_person.as_str().to_owned(),
            contact_mobile: application.contact_mobile.as_str().to_owned(),
            contact_email: application.contact_email.as_str().to_owned(),
            business_address: BusinessAddressDto::from(application.business_address),
            application_data: application.application_data,
            status: application.status.as_str().to_owned(),
            reviewed_by: application.reviewed_by.map(|id| id.to_string()),
            reviewed_at: application.reviewed_at.map(format_timestamp),
            rejection_reason: application.rejection_reason,
            created_at: format_timestamp(application.created_at),
            updated_at: format_timestamp(application.updated_at),
        }
    }
}

impl From<SubmitVendorApplicationRequest> for SubmitVendorApplicationInput {
    fn from(request: SubmitVendorApplicationRequest) -> Self {
        Self {
            business_name: request.business_name,
            business_type: request.business_type,
            contact_person: request.contact_person,
            contact_mobile: request.contact_mobile,
            contact_email: request.contact_email,
            business_address: BusinessAddress::from(request.business_address),
            application_data: request.application_data,
        }
    }
}

impl From<ApprovalHistoryRecord> for ApprovalHistoryResponse {
    fn from(record: ApprovalHistoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            application_id: record.application_id.to_string(),
            approved_by: record.approved_by.to_string(),
            action: record.action.as_str().to_owned(),
            comments: record.comments,
            created_at: format_timestamp(record.created_at),
        }
    }
}
