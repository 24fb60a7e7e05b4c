//! `SignatureRepository` over the JSON document

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use super::{JsonStore, StoreData, now};
use crate::core::models::{
    ActiveSignatureMetadata, ApprovalCriteria, ApprovalListDelta, ClaGroup, Company,
    CompanySignaturesQuery, CorporateContributor, EmployeeSignaturesQuery, GithubOrg,
    IclaSignatureSummary, Page, PageRequest, ProjectSignaturesQuery, Signature, SignatureCompanyId,
    SignatureReport, SignatureSummary, SignatureType, SortOrder, User, UserSignaturesQuery,
};
use crate::core::ports::SignatureRepository;

/// Signatures passing `keep`, ordered by ID
fn select(data: &StoreData, keep: impl Fn(&Signature) -> bool) -> Vec<Signature> {
    let mut matches = data.signatures.iter().filter(|s| keep(*s)).cloned().collect::<Vec<_>>();
    matches.sort_by(|a, b| a.signature_id.cmp(&b.signature_id));
    matches
}

fn by_id(signature: &Signature) -> &str {
    &signature.signature_id
}

/// Whether a corporate signature belongs to the company
fn is_company_ccla(signature: &Signature, company_id: &str) -> bool {
    signature.signature_type == SignatureType::Corporate
        && (signature.is_for_company(company_id) || signature.reference_id == company_id)
}

fn github_orgs(signature: &Signature) -> Vec<GithubOrg> {
    signature
        .approval_list
        .github_org
        .iter()
        .map(|id| GithubOrg { id: id.clone() })
        .collect()
}

#[async_trait]
impl SignatureRepository for JsonStore {
    async fn get_signature(&self, signature_id: &str) -> anyhow::Result<Option<Signature>> {
        self.read(|data| data.signatures.iter().find(|s| s.signature_id == signature_id).cloned())
    }

    async fn get_individual_signature(
        &self,
        cla_group_id: &str,
        user_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> anyhow::Result<Option<Signature>> {
        self.read(|data| {
            select(data, |s| {
                s.signature_type == SignatureType::Individual
                    && s.project_id == cla_group_id
                    && s.reference_id == user_id
                    && s.matches_flags(approved, signed)
            })
            .into_iter()
            .next()
        })
    }

    async fn get_corporate_signature(
        &self,
        cla_group_id: &str,
        company_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> anyhow::Result<Option<Signature>> {
        self.read(|data| {
            select(data, |s| {
                is_company_ccla(s, company_id) && s.project_id == cla_group_id && s.matches_flags(approved, signed)
            })
            .into_iter()
            .next()
        })
    }

    async fn get_project_signatures(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> anyhow::Result<Page<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                s.project_id == query.project_id
                    && query.signature_type.is_none_or(|t| t == s.signature_type)
                    && s.matches_flags(query.approved, query.signed)
                    && query.search_term.as_deref().is_none_or(|term| s.matches_search(term))
            });
            Page::from_sorted(matches, &query.page, by_id)
        })
    }

    async fn create_project_summary_report(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> anyhow::Result<SignatureReport> {
        self.read(|data| {
            let matches = select(data, |s| {
                s.project_id == query.project_id
                    && query.signature_type.is_none_or(|t| t == s.signature_type)
                    && s.matches_flags(query.approved, query.signed)
            });
            let count = |kind: SignatureType| matches.iter().filter(|s| s.signature_type == kind).count();
            let individual_count = count(SignatureType::Individual);
            let corporate_count = count(SignatureType::Corporate);
            let employee_count = count(SignatureType::Employee);

            let page = Page::from_sorted(matches, &query.page, by_id);
            SignatureReport {
                project_id: query.project_id.clone(),
                total_count: page.total_count,
                individual_count,
                corporate_count,
                employee_count,
                signatures: page.items.iter().map(SignatureSummary::from).collect(),
                last_key: page.last_key,
            }
        })
    }

    async fn get_project_company_signature(
        &self,
        company_id: &str,
        project_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> anyhow::Result<Option<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                is_company_ccla(s, company_id) && s.project_id == project_id && s.matches_flags(approved, signed)
            });
            Page::from_sorted(matches, page, by_id).items.into_iter().next()
        })
    }

    async fn get_project_company_signatures(
        &self,
        company_id: &str,
        project_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
        sort_order: SortOrder,
        page: &PageRequest,
    ) -> anyhow::Result<Page<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                is_company_ccla(s, company_id) && s.project_id == project_id && s.matches_flags(approved, signed)
            });
            let mut result = Page::from_sorted(matches, page, by_id);
            // Cursors always walk IDs ascending; order only applies within a page.
            if sort_order == SortOrder::Desc {
                result.items.reverse();
            }
            result
        })
    }

    async fn get_project_company_employee_signatures(
        &self,
        query: &EmployeeSignaturesQuery,
        criteria: &ApprovalCriteria,
    ) -> anyhow::Result<Page<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                s.signature_type == SignatureType::Employee
                    && s.project_id == query.project_id
                    && s.is_for_company(&query.company_id)
                    && criteria.matches(s)
            });
            let page = PageRequest {
                next_key: query.next_key.clone(),
                page_size: query.page_size.unwrap_or_default(),
            };
            Page::from_sorted(matches, &page, by_id)
        })
    }

    async fn get_company_signatures(
        &self,
        query: &CompanySignaturesQuery,
        page_size: i64,
        load_acl: bool,
    ) -> anyhow::Result<Page<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                (s.is_for_company(&query.company_id) || is_company_ccla(s, &query.company_id))
                    && query.signature_type.is_none_or(|t| t == s.signature_type)
                    && query.user_id.as_deref().is_none_or(|u| s.reference_id == u)
            });
            let page = PageRequest {
                next_key: query.next_key.clone(),
                page_size,
            };
            let mut result = Page::from_sorted(matches, &page, by_id);
            if !load_acl {
                for signature in &mut result.items {
                    signature.acl.clear();
                }
            }
            result
        })
    }

    async fn get_company_ids_with_signed_corporate_signatures(
        &self,
        cla_group_id: &str,
    ) -> anyhow::Result<Vec<SignatureCompanyId>> {
        self.read(|data| {
            select(data, |s| {
                s.signature_type == SignatureType::Corporate && s.project_id == cla_group_id && s.is_active()
            })
            .into_iter()
            .map(|s| SignatureCompanyId {
                company_id: s.company_id.clone().unwrap_or_else(|| s.reference_id.clone()),
                signature_id: s.signature_id,
            })
            .collect()
        })
    }

    async fn get_user_signatures(
        &self,
        query: &UserSignaturesQuery,
        page_size: i64,
    ) -> anyhow::Result<Page<Signature>> {
        self.read(|data| {
            let matches = select(data, |s| {
                s.signature_type != SignatureType::Corporate
                    && s.reference_id == query.user_id
                    && query
                        .user_name
                        .as_deref()
                        .is_none_or(|name| s.user_name.as_deref() == Some(name))
            });
            let page = PageRequest {
                next_key: query.next_key.clone(),
                page_size,
            };
            Page::from_sorted(matches, &page, by_id)
        })
    }

    async fn project_signatures(&self, project_id: &str) -> anyhow::Result<Vec<Signature>> {
        self.read(|data| select(data, |s| s.project_id == project_id))
    }

    async fn invalidate_project_record(
        &self,
        signature_id: &str,
        note: &str,
    ) -> anyhow::Result<()> {
        self.write(|data| {
            let signature = data.signature_mut(signature_id)?;
            signature.approved = false;
            signature.note = Some(note.to_string());
            signature.modified = now();
            Ok(())
        })
    }

    async fn get_github_organizations_from_approval_list(
        &self,
        signature_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>> {
        self.read(|data| {
            data.signatures
                .iter()
                .find(|s| s.signature_id == signature_id)
                .map(github_orgs)
                .ok_or_else(|| anyhow::anyhow!("signature not found: {signature_id}"))
        })?
    }

    async fn add_github_organization_to_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>> {
        self.write(|data| {
            let signature = data.signature_mut(signature_id)?;
            let org = organization_id.trim();
            if !signature.approval_list.github_org.iter().any(|o| o == org) {
                signature.approval_list.github_org.push(org.to_string());
                signature.modified = now();
            }
            Ok(github_orgs(signature))
        })
    }

    async fn delete_github_organization_from_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>> {
        self.write(|data| {
            let signature = data.signature_mut(signature_id)?;
            let org = organization_id.trim();
            signature.approval_list.github_org.retain(|o| o != org);
            signature.modified = now();
            Ok(github_orgs(signature))
        })
    }

    async fn update_approval_list(
        &self,
        cla_manager: &User,
        cla_group: &ClaGroup,
        company_id: &str,
        delta: &ApprovalListDelta,
    ) -> anyhow::Result<Signature> {
        self.write(|data| {
            let signature = data
                .signatures
                .iter_mut()
                .filter(|s| is_company_ccla(s, company_id) && s.project_id == cla_group.project_id && s.is_active())
                .min_by(|a, b| a.signature_id.cmp(&b.signature_id))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "no active corporate signature for company {company_id} on {}",
                        cla_group.project_id
                    )
                })?;

            signature.approval_list.apply(delta);
            signature.modified = now();
            debug!(
                "approval list of {} updated by {}",
                signature.signature_id, cla_manager.username
            );
            Ok(signature.clone())
        })
    }

    async fn add_cla_manager(&self, signature_id: &str, user: &User) -> anyhow::Result<Signature> {
        self.write(|data| {
            let signature = data.signature_mut(signature_id)?;
            if !signature.acl.iter().any(|m| m.user_id == user.user_id) {
                signature.acl.push(user.clone());
                signature.modified = now();
            }
            Ok(signature.clone())
        })
    }

    async fn remove_cla_manager(
        &self,
        signature_id: &str,
        username: &str,
    ) -> anyhow::Result<Signature> {
        self.write(|data| {
            let signature = data.signature_mut(signature_id)?;
            let before = signature.acl.len();
            signature.acl.retain(|m| m.username != username);
            if signature.acl.len() == before {
                anyhow::bail!("{username} is not a CLA manager of {signature_id}");
            }
            signature.modified = now();
            Ok(signature.clone())
        })
    }

    async fn get_cla_group_icla_signatures(
        &self,
        cla_group_id: &str,
        search_term: Option<String>,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> anyhow::Result<Page<IclaSignatureSummary>> {
        self.read(|data| {
            let matches = select(data, |s| {
                s.signature_type == SignatureType::Individual
                    && s.project_id == cla_group_id
                    && s.matches_flags(approved, signed)
                    && search_term.as_deref().is_none_or(|term| s.matches_search(term))
            });
            Page::from_sorted(matches, page, by_id).map(|s| IclaSignatureSummary::from(&s))
        })
    }

    async fn get_cla_group_corporate_contributors(
        &self,
        cla_group_id: &str,
        company_id: Option<String>,
        search_term: Option<String>,
    ) -> anyhow::Result<Vec<CorporateContributor>> {
        self.read(|data| {
            select(data, |s| {
                s.signature_type == SignatureType::Employee
                    && s.project_id == cla_group_id
                    && s.is_active()
                    && company_id.as_deref().is_none_or(|c| s.is_for_company(c))
                    && search_term.as_deref().is_none_or(|term| s.matches_search(term))
            })
            .iter()
            .map(CorporateContributor::from)
            .collect()
        })
    }

    async fn create_project_company_employee_signature(
        &self,
        company: &Company,
        cla_group: &ClaGroup,
        employee: &User,
    ) -> anyhow::Result<Signature> {
        let timestamp = now();
        let signature = Signature {
            signature_id: Uuid::new_v4().to_string(),
            signature_type: SignatureType::Employee,
            project_id: cla_group.project_id.clone(),
            company_id: Some(company.company_id.clone()),
            reference_id: employee.user_id.clone(),
            reference_name: if employee.name.is_empty() {
                employee.username.clone()
            } else {
                employee.name.clone()
            },
            user_email: employee.best_email().map(str::to_string),
            user_github_username: employee.github_login().map(str::to_string),
            user_gitlab_username: employee.gitlab_username.clone().filter(|u| !u.is_empty()),
            user_name: Some(employee.username.clone()).filter(|u| !u.is_empty()),
            approved: true,
            signed: true,
            created: timestamp.clone(),
            modified: timestamp,
            ..Signature::default()
        };

        self.write(|data| {
            data.signatures.push(signature.clone());
            Ok(())
        })?;
        Ok(signature)
    }

    async fn get_active_signature_metadata(
        &self,
        user_id: &str,
    ) -> anyhow::Result<Option<ActiveSignatureMetadata>> {
        self.read(|data| data.signature_metadata.iter().find(|m| m.user_id == user_id).cloned())
    }
}
